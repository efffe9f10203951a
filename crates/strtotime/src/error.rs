//! Error types for strtotime operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TimeError {
    #[error("unsupported time format: {0}")]
    UnsupportedFormat(String),

    #[error("unknown time zone: {0}")]
    UnknownZone(String),

    #[error("input does not match layout: {0}")]
    LayoutMismatch(String),

    #[error("calendar fields out of representable range: {0}")]
    OutOfRange(String),

    #[error("ambiguous or nonexistent wall-clock time: {0}")]
    AmbiguousLocalTime(String),
}

pub type Result<T> = std::result::Result<T, TimeError>;
