use crate::config::ValidatorConfig;
use crate::models::{FileDescriptor, Issue, IssueCategory, StageResult, StageStatus};
use crate::utils::DocumentError;

pub struct FormatValidator;

impl FormatValidator {
    /// Check MIME type and size. Binary outcome: 100 on pass, 0 on fail.
    pub fn validate(
        file: &FileDescriptor,
        config: &ValidatorConfig,
    ) -> Result<StageResult, DocumentError> {
        let mut issues = Vec::new();

        if !config.is_allowed_mime(&file.mime_type) {
            issues.push(
                Issue::error(
                    IssueCategory::Format,
                    format!("Unsupported file type: {}", file.mime_type),
                )
                .with_suggestion("Upload a PDF, DOC, DOCX, JPEG or PNG file"),
            );
        }

        if file.size > config.max_file_size {
            issues.push(
                Issue::error(
                    IssueCategory::Format,
                    format!(
                        "File size {} bytes exceeds the {} MB limit",
                        file.size,
                        config.max_file_size / (1024 * 1024)
                    ),
                )
                .with_suggestion("Compress the file or upload a smaller scan"),
            );
        }

        let result = if issues.is_empty() {
            StageResult::new(StageStatus::Pass, 100, "File format and size are valid")
        } else {
            StageResult::new(StageStatus::Fail, 0, "File format or size is invalid")
        };

        Ok(result.with_issues(issues))
    }
}
