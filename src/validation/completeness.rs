use crate::models::{rule_for, ExtractedData, Issue, IssueCategory, StageResult, StageStatus};
use crate::utils::text::is_blank;
use crate::utils::DocumentError;

pub struct CompletenessValidator;

impl CompletenessValidator {
    pub fn validate(
        extracted: &ExtractedData,
        document_type: &str,
    ) -> Result<StageResult, DocumentError> {
        let rule = match rule_for(document_type) {
            Some(rule) => rule,
            None => {
                let issue = Issue::warning(
                    IssueCategory::Completeness,
                    format!("Unknown document type: {}", document_type),
                )
                .with_suggestion("Select one of the supported document types");

                let mut result = StageResult::new(
                    StageStatus::Warning,
                    50,
                    "No completeness rules for this document type",
                )
                .with_issues(vec![issue]);
                result.missing_fields = Some(Vec::new());
                return Ok(result);
            }
        };

        // Absent and whitespace-only values both count as missing
        let missing: Vec<String> = rule
            .required_fields
            .iter()
            .filter(|field| extracted.get(**field).map_or(true, |value| is_blank(value)))
            .map(|field| field.to_string())
            .collect();

        let mut result = if missing.is_empty() {
            StageResult::new(StageStatus::Pass, 100, "All required fields are present")
        } else {
            let required = rule.required_fields.len() as f64;
            let confidence = (100.0 * (1.0 - missing.len() as f64 / required)).round() as u8;
            let issue = Issue::error(
                IssueCategory::Completeness,
                format!("Missing required fields: {}", missing.join(", ")),
            )
            .with_suggestion(format!(
                "Upload a clearer copy of the {} showing every required field",
                rule.display_name
            ));

            StageResult::new(
                StageStatus::Fail,
                confidence,
                format!("{} of {} required fields missing", missing.len(), rule.required_fields.len()),
            )
            .with_issues(vec![issue])
        };

        result.missing_fields = Some(missing);
        Ok(result)
    }
}
