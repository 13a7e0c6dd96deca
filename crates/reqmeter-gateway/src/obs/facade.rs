//! Sink that forwards to the `metrics` crate facade.
//!
//! Timers become histograms holding nanoseconds; counters stay counters.
//! With no global recorder installed every write is a no-op.

use std::sync::Arc;
use std::time::Duration;

use reqmeter_core::error::Result;
use reqmeter_core::{CounterHandle, MetricsSink, TimerHandle};

#[derive(Debug, Clone, Copy, Default)]
pub struct FacadeSink;

impl FacadeSink {
    pub fn new() -> Self {
        Self
    }
}

struct FacadeTimer(metrics::Histogram);

impl TimerHandle for FacadeTimer {
    fn record(&self, duration: Duration) -> Result<()> {
        self.0.record(duration.as_nanos() as f64);
        Ok(())
    }
}

struct FacadeCounter(metrics::Counter);

impl CounterHandle for FacadeCounter {
    fn increment(&self) -> Result<()> {
        self.0.increment(1);
        Ok(())
    }
}

impl MetricsSink for FacadeSink {
    fn timer(&self, name: &str) -> Result<Arc<dyn TimerHandle>> {
        Ok(Arc::new(FacadeTimer(metrics::histogram!(name.to_string()))))
    }

    fn counter(&self, name: &str) -> Result<Arc<dyn CounterHandle>> {
        Ok(Arc::new(FacadeCounter(metrics::counter!(name.to_string()))))
    }
}
