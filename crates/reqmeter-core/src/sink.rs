//! Metrics sink contract.
//!
//! The instrumenter only ever calls `timer(name).record(duration)` and
//! `counter(name).increment()`. Names are arbitrary strings and are created
//! on first use. Implementations must tolerate concurrent calls from many
//! requests; the caller adds no locking of its own.

use std::sync::Arc;
use std::time::Duration;

use crate::error::Result;

/// Accumulates duration samples (recorded at nanosecond resolution).
pub trait TimerHandle: Send + Sync {
    fn record(&self, duration: Duration) -> Result<()>;
}

/// Monotonically increasing count.
pub trait CounterHandle: Send + Sync {
    fn increment(&self) -> Result<()>;
}

/// Write side of a metrics registry.
pub trait MetricsSink: Send + Sync {
    fn timer(&self, name: &str) -> Result<Arc<dyn TimerHandle>>;
    fn counter(&self, name: &str) -> Result<Arc<dyn CounterHandle>>;
}
