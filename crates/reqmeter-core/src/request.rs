//! Request descriptor and finalized outcome.

use std::time::Duration;

/// Read-only view of the request fields that feed metric naming.
///
/// `path` follows the host convention of carrying no leading `/`
/// (`orders`, `users/1`, and `""` for the root). Adapters are expected to
/// strip it before building the descriptor; naming itself never does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestInfo {
    pub path: String,
    pub method: String,
}

impl RequestInfo {
    pub fn new(path: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            method: method.into(),
        }
    }
}

/// Finalized result of one request. Produced once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub request: RequestInfo,
    pub status_code: u16,
    /// Wall time from registration to completion.
    pub duration: Duration,
}
