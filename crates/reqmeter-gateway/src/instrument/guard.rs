use std::sync::Arc;
use std::time::Instant;

use axum::http::{Response, StatusCode};

use reqmeter_core::{Outcome, RequestInfo};

use super::instrumenter::RequestInstrumenter;

/// Status code of a finished downstream call.
pub trait Completion {
    fn status_code(&self) -> u16;
}

impl Completion for StatusCode {
    fn status_code(&self) -> u16 {
        self.as_u16()
    }
}

impl<B> Completion for Response<B> {
    fn status_code(&self) -> u16 {
        self.status().as_u16()
    }
}

/// A service error means no response was produced; it counts as a 500.
impl<T: Completion, E> Completion for Result<T, E> {
    fn status_code(&self) -> u16 {
        match self {
            Ok(v) => v.status_code(),
            Err(_) => StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
        }
    }
}

/// One-shot completion callback for a single request.
///
/// `complete` consumes the guard, so a request can be recorded at most once.
/// Dropping it without completing (future cancelled, handler panicked) runs
/// the cancellation policy instead, so it also fires at least once.
pub struct CompletionGuard {
    instrumenter: Arc<RequestInstrumenter>,
    request: Option<RequestInfo>,
    started: Instant,
}

impl CompletionGuard {
    pub(crate) fn new(
        instrumenter: Arc<RequestInstrumenter>,
        request: RequestInfo,
        started: Instant,
    ) -> Self {
        Self {
            instrumenter,
            request: Some(request),
            started,
        }
    }

    /// Finalize the outcome and record it.
    pub fn complete(mut self, status_code: u16) {
        if let Some(request) = self.request.take() {
            let outcome = Outcome {
                request,
                status_code,
                duration: self.started.elapsed(),
            };
            self.instrumenter.record(&outcome);
        }
    }
}

impl Drop for CompletionGuard {
    fn drop(&mut self) {
        if let Some(request) = self.request.take() {
            self.instrumenter.record_cancelled(&request);
        }
    }
}
