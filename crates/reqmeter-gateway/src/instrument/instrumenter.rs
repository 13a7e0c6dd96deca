use std::future::Future;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Instant;

use reqmeter_core::error::Result;
use reqmeter_core::naming::{derive_counter_name, derive_timer_name, CANCELLED_COUNTER};
use reqmeter_core::{GroupingRules, MetricsSink, Outcome, RequestInfo};

use crate::config::CancelPolicy;

use super::guard::{Completion, CompletionGuard};

/// Records one timer sample and one status-class increment per finished
/// request.
///
/// Stateless per request; the grouping table is read-only after construction
/// so a single instance is shared (via `Arc`) by every in-flight request.
pub struct RequestInstrumenter {
    sink: Arc<dyn MetricsSink>,
    rules: GroupingRules,
    on_cancel: CancelPolicy,
}

impl RequestInstrumenter {
    pub fn new(sink: Arc<dyn MetricsSink>, rules: GroupingRules, on_cancel: CancelPolicy) -> Self {
        Self {
            sink,
            rules,
            on_cancel,
        }
    }

    pub fn rules(&self) -> &GroupingRules {
        &self.rules
    }

    /// Register completion for `request`; the clock starts now.
    pub fn begin(self: &Arc<Self>, request: RequestInfo) -> CompletionGuard {
        CompletionGuard::new(Arc::clone(self), request, Instant::now())
    }

    /// Register completion, then invoke `downstream` and record its result
    /// exactly once.
    ///
    /// If the returned future is dropped before `downstream` resolves, the
    /// cancellation policy applies instead of a measurement.
    pub fn instrument<F, Fut>(
        self: &Arc<Self>,
        request: RequestInfo,
        downstream: F,
    ) -> impl Future<Output = Fut::Output> + Send + 'static
    where
        F: FnOnce() -> Fut,
        Fut: Future + Send + 'static,
        Fut::Output: Completion,
    {
        let guard = self.begin(request);
        let fut = downstream();
        async move {
            let out = fut.await;
            guard.complete(out.status_code());
            out
        }
    }

    /// Timer name for this instrumenter's grouping table.
    pub fn timer_name(&self, request: &RequestInfo) -> String {
        derive_timer_name(&request.path, &request.method, &self.rules)
    }

    /// Write the timer sample then the status-class increment.
    ///
    /// Never fails and never panics outward: sink errors and sink panics are
    /// logged and discarded.
    pub fn record(&self, outcome: &Outcome) {
        let timer_name = self.timer_name(&outcome.request);
        let counter_name = derive_counter_name(outcome.status_code);

        if !(100..=599).contains(&outcome.status_code) {
            tracing::warn!(
                status = outcome.status_code,
                path = %outcome.request.path,
                "status code outside 100..=599"
            );
        }

        self.guarded("timer", &timer_name, |sink| {
            sink.timer(&timer_name)?.record(outcome.duration)
        });
        self.guarded("counter", &counter_name, |sink| {
            sink.counter(&counter_name)?.increment()
        });

        tracing::debug!(
            timer = %timer_name,
            counter = %counter_name,
            nanos = u64::try_from(outcome.duration.as_nanos()).unwrap_or(u64::MAX),
            "request recorded"
        );
    }

    /// Apply the cancellation policy for a request that never finished.
    pub fn record_cancelled(&self, request: &RequestInfo) {
        match self.on_cancel {
            CancelPolicy::Skip => {
                tracing::debug!(path = %request.path, method = %request.method, "request cancelled, not recorded");
            }
            CancelPolicy::Count => {
                tracing::debug!(path = %request.path, method = %request.method, "request cancelled");
                self.guarded("counter", CANCELLED_COUNTER, |sink| {
                    sink.counter(CANCELLED_COUNTER)?.increment()
                });
            }
        }
    }

    fn guarded<F>(&self, kind: &'static str, name: &str, write: F)
    where
        F: FnOnce(&dyn MetricsSink) -> Result<()>,
    {
        match catch_unwind(AssertUnwindSafe(|| write(self.sink.as_ref()))) {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                tracing::warn!(kind, name, error = %e, code = e.kind().as_str(), "metric write dropped");
            }
            Err(_) => {
                tracing::warn!(kind, name, "metrics sink panicked, write dropped");
            }
        }
    }
}
