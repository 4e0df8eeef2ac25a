pub mod data;
pub mod rules;

pub use data::*;
pub use rules::{rule_for, supported_document_types, DocumentTypeRule};
