use crate::models::rules::AADHAR;
use crate::models::{rule_for, ExtractedData, Issue, IssueCategory, StageResult, StageStatus};
use crate::utils::DocumentError;

pub struct AuthenticityValidator;

impl AuthenticityValidator {
    /// Pattern sanity checks standing in for tamper detection
    pub fn validate(
        extracted: &ExtractedData,
        document_type: &str,
    ) -> Result<StageResult, DocumentError> {
        let mut issues = Vec::new();

        if extracted.is_empty() {
            issues.push(
                Issue::warning(
                    IssueCategory::Authenticity,
                    "Insufficient data extracted to verify authenticity",
                )
                .with_suggestion("Upload a clearer copy of the document"),
            );
        }

        if document_type == AADHAR {
            if let Some(number) = extracted.get("aadhaarNumber") {
                let valid = rule_for(AADHAR)
                    .and_then(|rule| rule.check_format("aadhaarNumber", number))
                    .unwrap_or(true);
                if !valid {
                    issues.push(
                        Issue::error(
                            IssueCategory::Authenticity,
                            "Aadhaar number format is invalid",
                        )
                        .with_field("aadhaarNumber")
                        .with_suggestion("Aadhaar numbers have 12 digits in groups of four"),
                    );
                }
            }
        }

        let result = if issues.iter().any(Issue::is_error) {
            StageResult::new(StageStatus::Fail, 40, "Document authenticity could not be verified")
        } else if !issues.is_empty() {
            StageResult::new(StageStatus::Warning, 75, "Document authenticity needs manual review")
        } else {
            StageResult::new(StageStatus::Pass, 92, "No authenticity concerns found")
        };

        Ok(result.with_issues(issues))
    }
}
