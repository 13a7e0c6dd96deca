//! Shared error type across reqmeter crates.

use thiserror::Error;

/// Coarse error category (stable API, used in logs and tests).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Configuration could not be parsed or failed validation.
    Config,
    /// The metrics sink rejected a write.
    Sink,
    /// Internal invariant violated.
    Internal,
}

impl ErrorKind {
    /// String representation used in log fields.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Config => "CONFIG",
            ErrorKind::Sink => "SINK",
            ErrorKind::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, ReqMeterError>;

/// Unified error type used by core and gateway.
#[derive(Debug, Error)]
pub enum ReqMeterError {
    #[error("bad config: {0}")]
    BadConfig(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("invalid pattern for group {group}: {source}")]
    InvalidPattern {
        group: String,
        #[source]
        source: regex::Error,
    },
    #[error("metric registry full (limit {0})")]
    RegistryFull(usize),
    #[error("sink: {0}")]
    Sink(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl ReqMeterError {
    /// Map an error to its stable category.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ReqMeterError::BadConfig(_)
            | ReqMeterError::UnsupportedVersion
            | ReqMeterError::InvalidPattern { .. } => ErrorKind::Config,
            ReqMeterError::RegistryFull(_) | ReqMeterError::Sink(_) => ErrorKind::Sink,
            ReqMeterError::Internal(_) => ErrorKind::Internal,
        }
    }
}
