//! reqmeter core: transport-agnostic request naming, sink contracts, and errors.
//!
//! This crate defines how a finished request is turned into metric names and
//! which operations a metrics sink must offer. It intentionally carries no
//! transport or runtime dependencies so the same naming can back any HTTP
//! stack.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Instrumentation must never take a request down, so every fallible path
//! surfaces as `ReqMeterError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod naming;
pub mod request;
pub mod sink;

/// Shared result type.
pub use error::{Result, ReqMeterError};
pub use naming::{derive_counter_name, derive_timer_name, GroupingRule, GroupingRules};
pub use request::{Outcome, RequestInfo};
pub use sink::{CounterHandle, MetricsSink, TimerHandle};
