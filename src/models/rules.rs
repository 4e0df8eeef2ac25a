use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;

/// Static validation rules for one supported document type
pub struct DocumentTypeRule {
    pub key: &'static str,
    pub display_name: &'static str,
    pub required_fields: Vec<&'static str>,
    pub format_checks: HashMap<&'static str, Regex>,
    pub cross_check_fields: Vec<&'static str>,
}

impl DocumentTypeRule {
    fn new(
        key: &'static str,
        display_name: &'static str,
        required_fields: &[&'static str],
        format_checks: &[(&'static str, &str)],
        cross_check_fields: &[&'static str],
    ) -> Self {
        DocumentTypeRule {
            key,
            display_name,
            required_fields: required_fields.to_vec(),
            format_checks: format_checks
                .iter()
                .map(|(field, pattern)| (*field, Regex::new(pattern).unwrap()))
                .collect(),
            cross_check_fields: cross_check_fields.to_vec(),
        }
    }

    /// Evaluate the pattern registered for `field`; `None` when the field has no pattern
    pub fn check_format(&self, field: &str, value: &str) -> Option<bool> {
        self.format_checks
            .get(field)
            .map(|pattern| pattern.is_match(value.trim()))
    }
}

pub const AADHAR: &str = "aadhar";
pub const PASSPORT: &str = "passport";
pub const VISA: &str = "visa";
pub const EDUCATION_CERTIFICATE: &str = "education_certificate";
pub const PAYSLIP: &str = "payslip";
pub const BANK_STATEMENT: &str = "bank_statement";

// Only the Aadhaar number pattern feeds a check today; the other
// format_checks entries describe each type's field formats for callers.
lazy_static! {
    static ref DOCUMENT_RULES: HashMap<&'static str, DocumentTypeRule> = {
        let rules = vec![
            DocumentTypeRule::new(
                AADHAR,
                "Aadhaar Card",
                &["name", "aadhaarNumber", "dateOfBirth", "gender", "address"],
                &[
                    // Anchored: the whole value must be 12 digits, not just contain them
                    ("aadhaarNumber", r"^\d{4}\s?\d{4}\s?\d{4}$"),
                    ("dateOfBirth", r"^\d{2}/\d{2}/\d{4}$"),
                ],
                &["name", "dateOfBirth"],
            ),
            DocumentTypeRule::new(
                PASSPORT,
                "Passport",
                &["name", "passportNumber", "nationality", "dateOfBirth", "dateOfExpiry"],
                &[
                    ("passportNumber", r"^[A-Z][0-9]{7}$"),
                    ("dateOfBirth", r"^\d{2}/\d{2}/\d{4}$"),
                    ("dateOfExpiry", r"^\d{2}/\d{2}/\d{4}$"),
                ],
                &["name", "dateOfBirth", "nationality"],
            ),
            DocumentTypeRule::new(
                VISA,
                "Visa",
                &["name", "visaNumber", "visaType", "country", "validUntil"],
                &[
                    ("visaNumber", r"^[A-Z0-9]{8,12}$"),
                    ("validUntil", r"^\d{2}/\d{2}/\d{4}$"),
                ],
                &["name"],
            ),
            DocumentTypeRule::new(
                EDUCATION_CERTIFICATE,
                "Education Certificate",
                &["name", "degree", "institution", "yearOfPassing"],
                &[("yearOfPassing", r"^(19|20)\d{2}$")],
                &["name"],
            ),
            DocumentTypeRule::new(
                PAYSLIP,
                "Payslip",
                &["name", "employerName", "payPeriod", "netSalary"],
                &[
                    ("grossSalary", r"^\d+(\.\d{1,2})?$"),
                    ("netSalary", r"^\d+(\.\d{1,2})?$"),
                ],
                &["name"],
            ),
            DocumentTypeRule::new(
                BANK_STATEMENT,
                "Bank Statement",
                &["name", "accountNumber", "bankName", "ifscCode"],
                &[("ifscCode", r"^[A-Z]{4}0[A-Z0-9]{6}$")],
                &["name"],
            ),
        ];
        rules.into_iter().map(|rule| (rule.key, rule)).collect()
    };
}

/// Look up the rule for a document type key
pub fn rule_for(document_type: &str) -> Option<&'static DocumentTypeRule> {
    DOCUMENT_RULES.get(document_type)
}

/// Keys of all supported document types, sorted
pub fn supported_document_types() -> Vec<&'static str> {
    let mut keys: Vec<&'static str> = DOCUMENT_RULES.keys().copied().collect();
    keys.sort_unstable();
    keys
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_six_document_types() {
        assert_eq!(supported_document_types().len(), 6);
        assert!(rule_for("unknown_type").is_none());
    }

    #[test]
    fn test_cross_check_fields_are_required() {
        for key in supported_document_types() {
            let rule = rule_for(key).unwrap();
            for field in &rule.cross_check_fields {
                assert!(
                    rule.required_fields.contains(field),
                    "{} cross-checks {} which is not required",
                    key,
                    field
                );
            }
        }
    }

    #[test]
    fn test_aadhaar_number_pattern() {
        let rule = rule_for(AADHAR).unwrap();
        assert_eq!(rule.check_format("aadhaarNumber", "1234 5678 9012"), Some(true));
        assert_eq!(rule.check_format("aadhaarNumber", "123456789012"), Some(true));
        assert_eq!(rule.check_format("aadhaarNumber", "1234-5678-9012"), Some(false));
        assert_eq!(rule.check_format("aadhaarNumber", "12345678"), Some(false));
        assert_eq!(rule.check_format("aadhaarNumber", "UID 1234 5678 9012"), Some(false));
        assert_eq!(rule.check_format("aadhaarNumber", "1234 5678 90123"), Some(false));
        assert_eq!(rule.check_format("gender", "Male"), None);
    }
}
