use crate::config::ValidatorConfig;
use crate::models::*;
use crate::processing::{Extractor, MockExtractor};
use crate::utils::DocumentError;
use crate::validation::*;
use chrono::Utc;
use futures::future::join_all;
use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;

pub const SKIPPED_MESSAGE: &str = "Skipped due to format failure";
pub const REVIEW_ERRORS: &str = "Review and fix the errors before submitting this document";
pub const REVIEW_WARNINGS: &str = "Review the warnings; manual verification may be required";
pub const VALIDATION_PASSED: &str = "Validation passed, you can proceed with this document";

/// Stage results gathered by one pipeline run, before aggregation
struct PipelineOutcome {
    checks: ValidationChecks,
    extracted: ExtractedData,
    short_circuited: bool,
}

pub struct DocumentValidator {
    config: ValidatorConfig,
    extractor: Arc<dyn Extractor>,
}

impl DocumentValidator {
    /// Validator backed by the canned-data extractor
    pub fn new(config: ValidatorConfig) -> Self {
        let extractor = Arc::new(MockExtractor::with_latency(config.extraction_latency()));
        DocumentValidator { config, extractor }
    }

    pub fn with_extractor(config: ValidatorConfig, extractor: Arc<dyn Extractor>) -> Self {
        DocumentValidator { config, extractor }
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Run the full pipeline for one document. Failures inside any stage,
    /// panics included, come back as a report with status `error`.
    pub async fn validate(
        &self,
        file: &FileDescriptor,
        document_type: &str,
        form_data: &FormData,
    ) -> ValidationReport {
        let started = Instant::now();
        let uploaded_at = Utc::now();
        let document_id = Uuid::new_v4().to_string();

        let outcome = AssertUnwindSafe(self.run_pipeline(file, document_type, form_data))
            .catch_unwind()
            .await
            .unwrap_or_else(|panic| Err(DocumentError::StagePanicked(panic_message(&*panic))));

        let mut report = match outcome {
            Ok(outcome) => Self::aggregate(outcome),
            Err(err) => {
                log::warn!("validation of {} failed: {}", file.name, err);
                Self::system_error(&err)
            }
        };

        report.document_id = document_id;
        report.document_type = document_type.to_string();
        report.document_name = file.name.clone();
        report.uploaded_at = uploaded_at;
        report.processing_time = started.elapsed().as_millis() as u64;

        log::info!(
            "validated {} ({}): {} at {}% confidence, {} issue(s)",
            report.document_name,
            report.document_type,
            report.status,
            report.overall_confidence,
            report.issues.len()
        );
        report
    }

    /// Validate several documents concurrently. Reports are returned in the
    /// order of `submissions`.
    pub async fn validate_batch(
        &self,
        submissions: &[DocumentSubmission],
        form_data: &FormData,
    ) -> Vec<ValidationReport> {
        let runs = submissions
            .iter()
            .map(|submission| self.validate(&submission.file, &submission.document_type, form_data));
        join_all(runs).await
    }

    async fn run_pipeline(
        &self,
        file: &FileDescriptor,
        document_type: &str,
        form_data: &FormData,
    ) -> Result<PipelineOutcome, DocumentError> {
        // Step 1: Format gate
        let format = FormatValidator::validate(file, &self.config)?;
        log::debug!("format check for {}: {:?}", file.name, format.status);

        if format.status == StageStatus::Fail {
            return Ok(PipelineOutcome {
                checks: ValidationChecks {
                    format,
                    quality: StageResult::pending(SKIPPED_MESSAGE),
                    extraction: StageResult::pending(SKIPPED_MESSAGE),
                    consistency: StageResult::pending(SKIPPED_MESSAGE),
                    authenticity: StageResult::pending(SKIPPED_MESSAGE),
                    completeness: StageResult::pending(SKIPPED_MESSAGE),
                },
                extracted: ExtractedData::new(),
                short_circuited: true,
            });
        }

        // Step 2: Quality heuristic
        let quality = QualityValidator::validate_async(file, &self.config).await?;
        log::debug!("quality check for {}: {:?}", file.name, quality.status);

        // Step 3: Extraction
        let document = self.extractor.extract(file, document_type).await?;
        let extraction = StageResult::new(
            StageStatus::Pass,
            90,
            format!(
                "Extracted {} fields using {} extractor",
                document.fields.len(),
                self.extractor.name()
            ),
        );
        let extracted = document.fields;

        // Step 4: Checks that only depend on the extracted fields
        let completeness = CompletenessValidator::validate(&extracted, document_type)?;
        let consistency = ConsistencyValidator::validate(&extracted, form_data, document_type)?;
        let authenticity = AuthenticityValidator::validate(&extracted, document_type)?;
        log::debug!(
            "checks for {}: completeness {:?}, consistency {:?}, authenticity {:?}",
            file.name,
            completeness.status,
            consistency.status,
            authenticity.status
        );

        Ok(PipelineOutcome {
            checks: ValidationChecks {
                format,
                quality,
                extraction,
                consistency,
                authenticity,
                completeness,
            },
            extracted,
            short_circuited: false,
        })
    }

    fn aggregate(outcome: PipelineOutcome) -> ValidationReport {
        let PipelineOutcome {
            checks,
            extracted,
            short_circuited,
        } = outcome;

        let issues: Vec<Issue> = checks
            .iter()
            .flat_map(|(_, result)| result.issues.iter().cloned())
            .collect();
        let field_comparisons = checks.consistency.comparisons.clone().unwrap_or_default();

        let (status, overall_confidence) = if short_circuited {
            (ReportStatus::Invalid, 0)
        } else {
            let confidence = overall_confidence(&checks);
            (classify_status(&issues, confidence), confidence)
        };
        let recommendations = build_recommendations(&issues, overall_confidence);

        ValidationReport {
            document_id: String::new(),
            document_type: String::new(),
            document_name: String::new(),
            uploaded_at: Utc::now(),
            status,
            overall_confidence,
            checks: Some(checks),
            extracted_data: extracted,
            field_comparisons,
            issues,
            recommendations,
            processing_time: 0,
        }
    }

    fn system_error(err: &DocumentError) -> ValidationReport {
        let issue = Issue::error(IssueCategory::System, format!("Validation failed: {}", err))
            .with_suggestion("Try uploading the document again");

        ValidationReport {
            document_id: String::new(),
            document_type: String::new(),
            document_name: String::new(),
            uploaded_at: Utc::now(),
            status: ReportStatus::Error,
            overall_confidence: 0,
            checks: None,
            extracted_data: ExtractedData::new(),
            field_comparisons: Vec::new(),
            issues: vec![issue],
            recommendations: vec![REVIEW_ERRORS.to_string()],
            processing_time: 0,
        }
    }
}

/// Rounded mean of the stage confidences above zero; 0 when there are none
pub fn overall_confidence(checks: &ValidationChecks) -> u8 {
    let scored: Vec<u32> = checks
        .iter()
        .map(|(_, result)| result.confidence as u32)
        .filter(|confidence| *confidence > 0)
        .collect();

    if scored.is_empty() {
        return 0;
    }
    let sum: u32 = scored.iter().sum();
    (sum as f64 / scored.len() as f64).round() as u8
}

pub fn classify_status(issues: &[Issue], confidence: u8) -> ReportStatus {
    if issues.iter().any(Issue::is_error) || confidence < 50 {
        ReportStatus::Invalid
    } else if issues.iter().any(Issue::is_warning) || confidence < 80 {
        ReportStatus::Warning
    } else {
        ReportStatus::Valid
    }
}

pub fn build_recommendations(issues: &[Issue], confidence: u8) -> Vec<String> {
    let mut recommendations = Vec::new();
    if issues.iter().any(Issue::is_error) {
        recommendations.push(REVIEW_ERRORS.to_string());
    }
    if issues.iter().any(Issue::is_warning) {
        recommendations.push(REVIEW_WARNINGS.to_string());
    }
    if confidence >= 90 {
        recommendations.push(VALIDATION_PASSED.to_string());
    }
    recommendations
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::ExtractedDocument;
    use async_trait::async_trait;

    struct FailingExtractor;

    #[async_trait]
    impl Extractor for FailingExtractor {
        async fn extract(
            &self,
            _file: &FileDescriptor,
            _document_type: &str,
        ) -> Result<ExtractedDocument, DocumentError> {
            Err(DocumentError::ExtractionError("service unavailable".to_string()))
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    struct PanickingExtractor;

    #[async_trait]
    impl Extractor for PanickingExtractor {
        async fn extract(
            &self,
            _file: &FileDescriptor,
            _document_type: &str,
        ) -> Result<ExtractedDocument, DocumentError> {
            panic!("decoder blew up")
        }

        fn name(&self) -> &str {
            "panicking"
        }
    }

    /// Returns a malformed Aadhaar number
    struct TamperedExtractor;

    #[async_trait]
    impl Extractor for TamperedExtractor {
        async fn extract(
            &self,
            _file: &FileDescriptor,
            document_type: &str,
        ) -> Result<ExtractedDocument, DocumentError> {
            let mut fields = MockExtractor::sample_fields(document_type);
            fields.insert("aadhaarNumber".to_string(), "1234-5678-9O12".to_string());
            Ok(ExtractedDocument {
                fields,
                raw_text: String::new(),
            })
        }

        fn name(&self) -> &str {
            "tampered"
        }
    }

    fn pdf(size: u64) -> FileDescriptor {
        FileDescriptor::new("document.pdf", "application/pdf", size)
    }

    fn form(name: &str) -> FormData {
        let mut form = FormData::new();
        form.insert("name".to_string(), name.to_string());
        form
    }

    #[tokio::test]
    async fn test_format_failure_short_circuits() {
        let validator = DocumentValidator::new(ValidatorConfig::default());
        let file = FileDescriptor::new("anim.gif", "image/gif", 1000);

        let report = validator.validate(&file, "aadhar", &FormData::new()).await;
        assert_eq!(report.status, ReportStatus::Invalid);
        assert_eq!(report.overall_confidence, 0);
        assert!(report.extracted_data.is_empty());

        let checks = report.checks.unwrap();
        assert_eq!(checks.format.status, StageStatus::Fail);
        for (stage, result) in checks.iter().skip(1) {
            assert_eq!(result.status, StageStatus::Pending, "{}", stage);
            assert_eq!(result.confidence, 0);
            assert_eq!(result.message, SKIPPED_MESSAGE);
        }
    }

    #[tokio::test]
    async fn test_clean_aadhaar_is_valid() {
        let validator = DocumentValidator::new(ValidatorConfig::default());
        let report = validator
            .validate(&pdf(200_000), "aadhar", &form("Shashank Tudum"))
            .await;

        // (100 + 95 + 90 + 100 + 95 + 92) / 6
        assert_eq!(report.overall_confidence, 95);
        assert_eq!(report.status, ReportStatus::Valid);
        assert!(report.issues.is_empty());
        assert!(!report.has_errors());
        assert!(!report.has_warnings());
        assert_eq!(validator.config(), &ValidatorConfig::default());
        assert_eq!(report.recommendations, vec![VALIDATION_PASSED.to_string()]);
        assert_eq!(report.document_name, "document.pdf");
        assert_eq!(report.document_type, "aadhar");
        assert!(!report.document_id.is_empty());
    }

    #[tokio::test]
    async fn test_tampered_aadhaar_is_never_valid() {
        let validator = DocumentValidator::with_extractor(
            ValidatorConfig::default(),
            Arc::new(TamperedExtractor),
        );
        let report = validator
            .validate(&pdf(200_000), "aadhar", &form("Shashank Tudum"))
            .await;

        assert_ne!(report.status, ReportStatus::Valid);
        assert_eq!(report.status, ReportStatus::Invalid);
        assert!(report.has_errors());
        assert!(report
            .issues
            .iter()
            .any(|issue| issue.is_error() && issue.category == IssueCategory::Authenticity));
        assert_eq!(report.recommendations[0], REVIEW_ERRORS);
    }

    #[tokio::test]
    async fn test_extractor_error_becomes_error_report() {
        let validator = DocumentValidator::with_extractor(
            ValidatorConfig::default(),
            Arc::new(FailingExtractor),
        );
        let report = validator.validate(&pdf(200_000), "passport", &FormData::new()).await;

        assert_eq!(report.status, ReportStatus::Error);
        assert_eq!(report.overall_confidence, 0);
        assert!(report.checks.is_none());
        assert!(report.extracted_data.is_empty());
        assert_eq!(report.issues.len(), 1);
        assert_eq!(report.issues[0].category, IssueCategory::System);
        assert!(report.issues[0].message.contains("service unavailable"));
    }

    #[tokio::test]
    async fn test_panic_becomes_error_report() {
        let validator = DocumentValidator::with_extractor(
            ValidatorConfig::default(),
            Arc::new(PanickingExtractor),
        );
        let report = validator.validate(&pdf(200_000), "visa", &FormData::new()).await;

        assert_eq!(report.status, ReportStatus::Error);
        assert!(report.issues[0].message.contains("decoder blew up"));
    }

    #[tokio::test]
    async fn test_small_image_lowers_status() {
        let validator = DocumentValidator::new(ValidatorConfig::default());
        let file = FileDescriptor::new("payslip.jpg", "image/jpeg", 20_000);
        let report = validator.validate(&file, "payslip", &form("Shashank Tudum")).await;

        assert_eq!(report.status, ReportStatus::Warning);
        assert_eq!(report.checks.unwrap().quality.status, StageStatus::Warning);
        assert!(report.recommendations.contains(&REVIEW_WARNINGS.to_string()));
    }

    #[test]
    fn test_zero_confidence_stages_are_excluded() {
        let checks = ValidationChecks {
            format: StageResult::new(StageStatus::Pass, 100, ""),
            quality: StageResult::new(StageStatus::Pass, 80, ""),
            extraction: StageResult::pending(""),
            consistency: StageResult::new(StageStatus::Pass, 0, ""),
            authenticity: StageResult::pending(""),
            completeness: StageResult::pending(""),
        };
        assert_eq!(overall_confidence(&checks), 90);
    }

    #[test]
    fn test_all_zero_confidence_is_zero() {
        let checks = ValidationChecks {
            format: StageResult::new(StageStatus::Fail, 0, ""),
            quality: StageResult::pending(""),
            extraction: StageResult::pending(""),
            consistency: StageResult::pending(""),
            authenticity: StageResult::pending(""),
            completeness: StageResult::pending(""),
        };
        assert_eq!(overall_confidence(&checks), 0);
    }

    #[test]
    fn test_classify_status_thresholds() {
        let warning = Issue::warning(IssueCategory::Quality, "low");
        let error = Issue::error(IssueCategory::Format, "bad");

        assert_eq!(classify_status(&[], 95), ReportStatus::Valid);
        assert_eq!(classify_status(&[], 80), ReportStatus::Valid);
        assert_eq!(classify_status(&[], 79), ReportStatus::Warning);
        assert_eq!(classify_status(&[], 49), ReportStatus::Invalid);
        assert_eq!(classify_status(&[warning.clone()], 99), ReportStatus::Warning);
        assert_eq!(classify_status(&[warning, error], 99), ReportStatus::Invalid);
    }

    #[test]
    fn test_recommendations_are_independent() {
        let issues = vec![
            Issue::warning(IssueCategory::Quality, "low"),
            Issue::error(IssueCategory::Completeness, "missing"),
        ];
        assert_eq!(build_recommendations(&issues, 92).len(), 3);
        assert!(build_recommendations(&[], 89).is_empty());
    }
}
