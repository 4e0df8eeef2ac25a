use crate::models::{ReportStatus, ValidationReport};
use serde::Serialize;

/// Reports collected by the caller, oldest first
#[derive(Debug, Default, Clone)]
pub struct ValidationHistory {
    entries: Vec<ValidationReport>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistorySummary {
    pub total: usize,
    pub valid: usize,
    pub warning: usize,
    pub invalid: usize,
    pub error: usize,
    pub average_confidence: u8,
}

impl ValidationHistory {
    pub fn new() -> Self {
        ValidationHistory::default()
    }

    /// Append a report and log its audit entry
    pub fn record(&mut self, report: ValidationReport) {
        log::info!("audit: {}", audit_entry(&report));
        self.entries.push(report);
    }

    pub fn entries(&self) -> &[ValidationReport] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Most recent report for a document type
    pub fn latest_for(&self, document_type: &str) -> Option<&ValidationReport> {
        self.entries
            .iter()
            .rev()
            .find(|report| report.document_type == document_type)
    }

    pub fn summary(&self) -> HistorySummary {
        let mut summary = HistorySummary {
            total: self.entries.len(),
            ..HistorySummary::default()
        };

        for report in &self.entries {
            match report.status {
                ReportStatus::Valid => summary.valid += 1,
                ReportStatus::Warning => summary.warning += 1,
                ReportStatus::Invalid => summary.invalid += 1,
                ReportStatus::Error => summary.error += 1,
            }
        }

        if !self.entries.is_empty() {
            let sum: u32 = self
                .entries
                .iter()
                .map(|report| report.overall_confidence as u32)
                .sum();
            summary.average_confidence = (sum as f64 / self.entries.len() as f64).round() as u8;
        }

        summary
    }
}

/// One-line summary of a report for the application audit log
pub fn audit_entry(report: &ValidationReport) -> String {
    let errors = report.issues.iter().filter(|issue| issue.is_error()).count();
    let warnings = report.issues.iter().filter(|issue| issue.is_warning()).count();
    format!(
        "document_validated id={} type={} name=\"{}\" status={} confidence={} errors={} warnings={} review={} at={}",
        report.document_id,
        report.document_type,
        report.document_name,
        report.status,
        report.overall_confidence,
        errors,
        warnings,
        report.has_errors() || report.has_warnings(),
        report.uploaded_at.to_rfc3339()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExtractedData, Issue, IssueCategory};
    use chrono::Utc;

    fn report(document_type: &str, status: ReportStatus, confidence: u8) -> ValidationReport {
        ValidationReport {
            document_id: format!("id-{}", confidence),
            document_type: document_type.to_string(),
            document_name: format!("{}.pdf", document_type),
            uploaded_at: Utc::now(),
            status,
            overall_confidence: confidence,
            checks: None,
            extracted_data: ExtractedData::new(),
            field_comparisons: Vec::new(),
            issues: Vec::new(),
            recommendations: Vec::new(),
            processing_time: 3,
        }
    }

    #[test]
    fn test_summary_counts() {
        let mut history = ValidationHistory::new();
        history.record(report("aadhar", ReportStatus::Valid, 95));
        history.record(report("passport", ReportStatus::Warning, 82));
        history.record(report("visa", ReportStatus::Invalid, 0));

        let summary = history.summary();
        assert_eq!(summary.total, 3);
        assert_eq!(summary.valid, 1);
        assert_eq!(summary.warning, 1);
        assert_eq!(summary.invalid, 1);
        assert_eq!(summary.error, 0);
        assert_eq!(summary.average_confidence, 59);

        let statuses: Vec<ReportStatus> = history.entries().iter().map(|r| r.status).collect();
        assert_eq!(
            statuses,
            vec![ReportStatus::Valid, ReportStatus::Warning, ReportStatus::Invalid]
        );
    }

    #[test]
    fn test_latest_for_prefers_newest() {
        let mut history = ValidationHistory::new();
        history.record(report("aadhar", ReportStatus::Invalid, 40));
        history.record(report("passport", ReportStatus::Valid, 95));
        history.record(report("aadhar", ReportStatus::Valid, 93));

        let latest = history.latest_for("aadhar").unwrap();
        assert_eq!(latest.overall_confidence, 93);
        assert!(history.latest_for("payslip").is_none());
    }

    #[test]
    fn test_empty_summary() {
        let history = ValidationHistory::new();
        assert!(history.is_empty());
        assert_eq!(history.summary(), HistorySummary::default());
    }

    #[test]
    fn test_audit_entry_counts_issues() {
        let mut entry = report("aadhar", ReportStatus::Invalid, 45);
        entry.issues = vec![
            Issue::error(IssueCategory::Authenticity, "bad number"),
            Issue::warning(IssueCategory::Quality, "low resolution"),
        ];
        let line = audit_entry(&entry);
        assert!(line.contains("status=INVALID"));
        assert!(line.contains("errors=1"));
        assert!(line.contains("warnings=1"));
        assert!(line.contains("review=true"));
    }

    #[test]
    fn test_audit_entry_clean_report_needs_no_review() {
        let entry = report("passport", ReportStatus::Valid, 95);
        assert!(!entry.has_errors());
        assert!(!entry.has_warnings());
        assert!(audit_entry(&entry).contains("review=false"));
    }
}
