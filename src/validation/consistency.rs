use crate::models::{
    rule_for, ExtractedData, FieldComparison, FormData, Issue, IssueCategory, StageResult,
    StageStatus,
};
use crate::utils::text::loose_match;
use crate::utils::DocumentError;

const MATCH_CONFIDENCE: u8 = 95;
const MISMATCH_CONFIDENCE: u8 = 30;

pub struct ConsistencyValidator;

impl ConsistencyValidator {
    /// Compare cross-check fields between the document and the form.
    ///
    /// Matching is deliberately loose: values match when equal after
    /// trimming and lowercasing, or when one contains the other. A field the
    /// form leaves empty therefore matches any document value.
    ///
    /// With no cross-check fields the stage reports a pass at confidence 0;
    /// the aggregator leaves zero-confidence stages out of the overall score.
    pub fn validate(
        extracted: &ExtractedData,
        form_data: &FormData,
        document_type: &str,
    ) -> Result<StageResult, DocumentError> {
        let fields: &[&str] = rule_for(document_type)
            .map(|rule| rule.cross_check_fields.as_slice())
            .unwrap_or(&[]);

        let mut comparisons = Vec::with_capacity(fields.len());
        let mut issues = Vec::new();

        for field in fields {
            let document_value = extracted.get(*field).cloned().unwrap_or_default();
            let form_value = form_data.get(*field).cloned().unwrap_or_default();
            let matched = loose_match(&form_value, &document_value);

            let discrepancy = if matched {
                None
            } else {
                issues.push(
                    Issue::warning(
                        IssueCategory::Consistency,
                        format!("Field '{}' does not match the form data", field),
                    )
                    .with_field(*field)
                    .with_suggestion("Verify the data entered in the form against the document"),
                );
                Some(format!(
                    "Form has '{}' but document shows '{}'",
                    form_value, document_value
                ))
            };

            comparisons.push(FieldComparison {
                field_name: field.to_string(),
                form_value,
                document_value,
                matched,
                confidence: if matched { MATCH_CONFIDENCE } else { MISMATCH_CONFIDENCE },
                discrepancy,
            });
        }

        let total_checks = comparisons.len();
        let match_count = comparisons.iter().filter(|c| c.matched).count();

        let confidence = if total_checks == 0 {
            0
        } else {
            let sum: u32 = comparisons.iter().map(|c| c.confidence as u32).sum();
            (sum as f64 / total_checks as f64).round() as u8
        };

        let status = if match_count == total_checks {
            StageStatus::Pass
        } else if match_count == 0 {
            StageStatus::Fail
        } else {
            StageStatus::Warning
        };

        let mut result = StageResult::new(
            status,
            confidence,
            format!("{} of {} fields match the form data", match_count, total_checks),
        )
        .with_issues(issues);
        result.comparisons = Some(comparisons);
        Ok(result)
    }
}
