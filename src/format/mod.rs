pub mod decimal;
pub mod doc_value_format;

pub use decimal::DecimalPattern;
pub use doc_value_format::DocValueFormat;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("Invalid decimal pattern [{pattern}]: {reason}")]
    InvalidDecimalPattern { pattern: String, reason: &'static str },

    #[error("Invalid date pattern [{0}]")]
    InvalidDatePattern(String),

    #[error("Unsupported time zone [{0}]")]
    InvalidTimeZone(String),
}
