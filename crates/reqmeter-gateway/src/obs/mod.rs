//! Metrics sinks.
//!
//! `MetricsRegistry` is the in-process default: timers and counters keyed by
//! name in `DashMap`s, updated with atomics. `FacadeSink` forwards to whatever
//! recorder is installed behind the `metrics` crate.

pub mod facade;
pub mod registry;

pub use facade::FacadeSink;
pub use registry::{Counter, MetricsRegistry, RegistrySnapshot, Timer, TimerSnapshot};
