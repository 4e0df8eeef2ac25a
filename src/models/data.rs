use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Field name to value, as supplied by the onboarding form
pub type FormData = BTreeMap<String, String>;

/// Field name to value, as read from the document
pub type ExtractedData = BTreeMap<String, String>;

/// Uploaded file as described by the upload UI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub mime_type: String,
    pub size: u64,
}

impl FileDescriptor {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, size: u64) -> Self {
        FileDescriptor {
            name: name.into(),
            mime_type: mime_type.into(),
            size,
        }
    }

    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }
}

/// One entry of a batch: a file and the document type it was uploaded as
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSubmission {
    #[serde(flatten)]
    pub file: FileDescriptor,
    pub document_type: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StageStatus {
    Pass,
    Warning,
    Fail,
    Pending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Valid,
    Warning,
    Invalid,
    Error,
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let label = match self {
            ReportStatus::Valid => "VALID",
            ReportStatus::Warning => "WARNING",
            ReportStatus::Invalid => "INVALID",
            ReportStatus::Error => "ERROR",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueCategory {
    Format,
    Quality,
    Completeness,
    Consistency,
    Authenticity,
    System,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub severity: Severity,
    pub category: IssueCategory,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub suggestion: Option<String>,
}

impl Issue {
    pub fn error(category: IssueCategory, message: impl Into<String>) -> Self {
        Issue {
            severity: Severity::Error,
            category,
            message: message.into(),
            field: None,
            suggestion: None,
        }
    }

    pub fn warning(category: IssueCategory, message: impl Into<String>) -> Self {
        Issue {
            severity: Severity::Warning,
            category,
            message: message.into(),
            field: None,
            suggestion: None,
        }
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldComparison {
    pub field_name: String,
    pub form_value: String,
    pub document_value: String,
    #[serde(rename = "match")]
    pub matched: bool,
    pub confidence: u8,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub discrepancy: Option<String>,
}

/// Outcome of a single pipeline stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageResult {
    pub status: StageStatus,
    pub confidence: u8,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub issues: Vec<Issue>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub missing_fields: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub comparisons: Option<Vec<FieldComparison>>,
}

impl StageResult {
    pub fn new(status: StageStatus, confidence: u8, message: impl Into<String>) -> Self {
        StageResult {
            status,
            confidence: confidence.min(100),
            message: message.into(),
            issues: Vec::new(),
            missing_fields: None,
            comparisons: None,
        }
    }

    pub fn pending(message: impl Into<String>) -> Self {
        StageResult::new(StageStatus::Pending, 0, message)
    }

    pub fn with_issues(mut self, issues: Vec<Issue>) -> Self {
        self.issues = issues;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Format,
    Quality,
    Extraction,
    Completeness,
    Consistency,
    Authenticity,
}

impl Stage {
    /// All stages in pipeline order
    pub const ALL: [Stage; 6] = [
        Stage::Format,
        Stage::Quality,
        Stage::Extraction,
        Stage::Completeness,
        Stage::Consistency,
        Stage::Authenticity,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Stage::Format => "format",
            Stage::Quality => "quality",
            Stage::Extraction => "extraction",
            Stage::Completeness => "completeness",
            Stage::Consistency => "consistency",
            Stage::Authenticity => "authenticity",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Per-stage results of one validation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationChecks {
    pub format: StageResult,
    pub quality: StageResult,
    pub extraction: StageResult,
    pub consistency: StageResult,
    pub authenticity: StageResult,
    pub completeness: StageResult,
}

impl ValidationChecks {
    pub fn get(&self, stage: Stage) -> &StageResult {
        match stage {
            Stage::Format => &self.format,
            Stage::Quality => &self.quality,
            Stage::Extraction => &self.extraction,
            Stage::Completeness => &self.completeness,
            Stage::Consistency => &self.consistency,
            Stage::Authenticity => &self.authenticity,
        }
    }

    /// Stage results in pipeline order
    pub fn iter(&self) -> impl Iterator<Item = (Stage, &StageResult)> + '_ {
        Stage::ALL.into_iter().map(move |stage| (stage, self.get(stage)))
    }
}

/// Final artifact of one validation run. Built once by the pipeline and
/// handed to the caller; nothing in this crate mutates it afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub document_id: String,
    pub document_type: String,
    pub document_name: String,
    pub uploaded_at: DateTime<Utc>,
    pub status: ReportStatus,
    pub overall_confidence: u8,
    /// Absent when the run ended in a system error
    pub checks: Option<ValidationChecks>,
    pub extracted_data: ExtractedData,
    pub field_comparisons: Vec<FieldComparison>,
    pub issues: Vec<Issue>,
    pub recommendations: Vec<String>,
    /// Milliseconds
    pub processing_time: u64,
}

impl ValidationReport {
    pub fn has_errors(&self) -> bool {
        self.issues.iter().any(Issue::is_error)
    }

    pub fn has_warnings(&self) -> bool {
        self.issues.iter().any(Issue::is_warning)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_descriptor_serializes_type_key() {
        let file = FileDescriptor::new("scan.png", "image/png", 1024);
        let json = serde_json::to_value(&file).unwrap();
        assert_eq!(json["type"], "image/png");
        assert!(file.is_image());
    }

    #[test]
    fn test_submission_deserializes_flat() {
        let json = r#"{"name":"a.pdf","type":"application/pdf","size":10,"documentType":"visa"}"#;
        let submission: DocumentSubmission = serde_json::from_str(json).unwrap();
        assert_eq!(submission.file.mime_type, "application/pdf");
        assert_eq!(submission.document_type, "visa");
    }

    #[test]
    fn test_field_comparison_match_key() {
        let comparison = FieldComparison {
            field_name: "name".to_string(),
            form_value: "a".to_string(),
            document_value: "a".to_string(),
            matched: true,
            confidence: 95,
            discrepancy: None,
        };
        let json = serde_json::to_value(&comparison).unwrap();
        assert_eq!(json["match"], true);
        assert_eq!(json["fieldName"], "name");
        assert!(json.get("discrepancy").is_none());
    }

    #[test]
    fn test_stage_result_clamps_confidence() {
        let result = StageResult::new(StageStatus::Pass, 250, "ok");
        assert_eq!(result.confidence, 100);
    }
}
