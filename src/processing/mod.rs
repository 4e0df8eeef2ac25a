pub mod extractor;

pub use extractor::{ExtractedDocument, Extractor, MockExtractor};
