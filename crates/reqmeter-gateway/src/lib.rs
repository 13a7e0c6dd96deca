//! reqmeter gateway library entry.
//!
//! Wires the config loader, metrics sinks, and the request timing middleware
//! into an axum stack. Consumed by the binary (`main.rs`) and by integration
//! tests.

pub mod app_state;
pub mod config;
pub mod instrument;
pub mod obs;
pub mod ops;
pub mod router;
