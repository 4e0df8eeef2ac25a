use crate::models::rules::{AADHAR, BANK_STATEMENT, EDUCATION_CERTIFICATE, PASSPORT, PAYSLIP, VISA};
use crate::models::{ExtractedData, FileDescriptor};
use crate::utils::DocumentError;
use async_trait::async_trait;
use std::time::Duration;

/// Structured fields read from a document, plus the raw text they came from
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExtractedDocument {
    pub fields: ExtractedData,
    pub raw_text: String,
}

/// Field extraction service. The pipeline only depends on this trait, so a
/// real OCR backend can replace [`MockExtractor`] without other changes.
#[async_trait]
pub trait Extractor: Send + Sync {
    async fn extract(
        &self,
        file: &FileDescriptor,
        document_type: &str,
    ) -> Result<ExtractedDocument, DocumentError>;

    fn name(&self) -> &str;
}

/// Deterministic extractor returning canned data per document type
#[derive(Debug, Clone, Default)]
pub struct MockExtractor {
    latency: Duration,
}

impl MockExtractor {
    pub fn new() -> Self {
        MockExtractor::default()
    }

    pub fn with_latency(latency: Duration) -> Self {
        MockExtractor { latency }
    }

    /// Canned field values for a document type; empty for unknown types
    pub fn sample_fields(document_type: &str) -> ExtractedData {
        let pairs: &[(&str, &str)] = match document_type {
            AADHAR => &[
                ("name", "Shashank Tudum"),
                ("aadhaarNumber", "1234 5678 9012"),
                ("dateOfBirth", "15/08/1995"),
                ("gender", "Male"),
                ("address", "42 MG Road, Bengaluru, Karnataka 560001"),
            ],
            PASSPORT => &[
                ("name", "Shashank Tudum"),
                ("passportNumber", "K1234567"),
                ("nationality", "Indian"),
                ("dateOfBirth", "15/08/1995"),
                ("dateOfExpiry", "14/08/2032"),
                ("placeOfIssue", "Bengaluru"),
            ],
            VISA => &[
                ("name", "Shashank Tudum"),
                ("visaNumber", "V98765432"),
                ("visaType", "H-1B"),
                ("country", "United States"),
                ("validFrom", "01/10/2024"),
                ("validUntil", "30/09/2027"),
            ],
            EDUCATION_CERTIFICATE => &[
                ("name", "Shashank Tudum"),
                ("degree", "Bachelor of Technology"),
                ("institution", "Visvesvaraya Technological University"),
                ("yearOfPassing", "2017"),
                ("grade", "8.6 CGPA"),
            ],
            PAYSLIP => &[
                ("name", "Shashank Tudum"),
                ("employerName", "Acme Technologies Pvt Ltd"),
                ("payPeriod", "March 2024"),
                ("grossSalary", "85000"),
                ("netSalary", "72500"),
            ],
            BANK_STATEMENT => &[
                ("name", "Shashank Tudum"),
                ("accountNumber", "XXXXXXXX4521"),
                ("bankName", "State Bank of India"),
                ("ifscCode", "SBIN0001234"),
                ("statementPeriod", "01/01/2024 - 31/03/2024"),
            ],
            _ => &[],
        };

        pairs
            .iter()
            .map(|(field, value)| (field.to_string(), value.to_string()))
            .collect()
    }
}

#[async_trait]
impl Extractor for MockExtractor {
    async fn extract(
        &self,
        file: &FileDescriptor,
        document_type: &str,
    ) -> Result<ExtractedDocument, DocumentError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let fields = Self::sample_fields(document_type);
        log::debug!(
            "extracted {} fields from {} as {}",
            fields.len(),
            file.name,
            document_type
        );

        Ok(ExtractedDocument {
            fields,
            raw_text: format!("[extracted text of {}]", file.name),
        })
    }

    fn name(&self) -> &str {
        "mock"
    }
}
