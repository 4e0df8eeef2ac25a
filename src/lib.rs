pub mod config;
pub mod document_validator;
pub mod history;
pub mod models;
pub mod processing;
pub mod utils;
pub mod validation;

pub use config::ValidatorConfig;
pub use document_validator::DocumentValidator;
pub use history::ValidationHistory;
