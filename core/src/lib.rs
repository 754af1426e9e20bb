pub mod error;
pub mod types;

pub use error::VerseGateError;
pub use types::{PassageResult, TextBlock, VerseRecord};
