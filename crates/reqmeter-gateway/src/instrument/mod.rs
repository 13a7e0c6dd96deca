//! Request instrumentation.
//!
//! `RequestInstrumenter` owns the naming rules and the sink; it hands out a
//! one-shot `CompletionGuard` per request. `RequestTimingLayer` wires that
//! into any tower service speaking `http`.

pub mod guard;
pub mod instrumenter;
pub mod layer;

pub use guard::{Completion, CompletionGuard};
pub use instrumenter::RequestInstrumenter;
pub use layer::{request_info, RequestTimingLayer, RequestTimingService};
