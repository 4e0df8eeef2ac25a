use crate::config::ValidatorConfig;
use crate::models::{FileDescriptor, Issue, IssueCategory, StageResult, StageStatus};
use crate::utils::DocumentError;

pub struct QualityValidator;

impl QualityValidator {
    /// Size-based resolution heuristic. Only images are judged; this stage
    /// never fails the pipeline.
    pub fn validate(
        file: &FileDescriptor,
        config: &ValidatorConfig,
    ) -> Result<StageResult, DocumentError> {
        if file.is_image() && file.size < config.low_quality_threshold {
            let issue = Issue::warning(
                IssueCategory::Quality,
                "Image resolution appears to be low",
            )
            .with_suggestion("Upload a higher resolution scan for better accuracy");

            return Ok(StageResult::new(
                StageStatus::Warning,
                75,
                "Image quality may affect extraction accuracy",
            )
            .with_issues(vec![issue]));
        }

        Ok(StageResult::new(StageStatus::Pass, 95, "Document quality is acceptable"))
    }

    /// Quality check with the configured scanning latency applied first
    pub async fn validate_async(
        file: &FileDescriptor,
        config: &ValidatorConfig,
    ) -> Result<StageResult, DocumentError> {
        let latency = config.quality_latency();
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
        Self::validate(file, config)
    }
}
