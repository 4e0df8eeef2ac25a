pub mod authenticity;
pub mod completeness;
pub mod consistency;
pub mod format;
pub mod quality;

pub use authenticity::AuthenticityValidator;
pub use completeness::CompletenessValidator;
pub use consistency::ConsistencyValidator;
pub use format::FormatValidator;
pub use quality::QualityValidator;
