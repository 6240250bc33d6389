use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid listing id: {0}")]
    InvalidId(String),

    #[error("invalid {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },
}
