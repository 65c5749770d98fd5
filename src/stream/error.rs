use thiserror::Error;

use crate::format::FormatError;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Stream truncated: needed {needed} bytes, {remaining} remaining")]
    Truncated { needed: usize, remaining: usize },

    #[error("Malformed vint: more than 5 bytes")]
    MalformedVInt,

    #[error("Length prefix {length} exceeds limit {max}")]
    LengthOutOfBounds { length: usize, max: usize },

    #[error("String is not valid UTF-8")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    #[error("Unknown {category} [{name}]")]
    UnknownNamedWriteable { category: &'static str, name: String },

    #[error("Unknown generic value type byte: {0}")]
    UnknownGenericType(i8),

    #[error("Generic value nesting exceeds depth {0}")]
    NestingTooDeep(usize),

    #[error("Non-finite double in generic value")]
    NonFiniteDouble,

    #[error("Invalid format: {0}")]
    InvalidFormat(#[from] FormatError),

    #[error("Aggregation name must not be empty")]
    EmptyName,
}
