//! Metric naming (timer + status-class counter).
//!
//! Both derivations are pure functions of their inputs: no I/O, no shared
//! mutable state, safe to call from any number of requests at once.

pub mod derive;
pub mod rules;

pub use derive::{
    derive_counter_name, derive_timer_name, CANCELLED_COUNTER, INVALID_STATUS_COUNTER,
    ROOT_GROUP,
};
pub use rules::{GroupingRule, GroupingRules};
