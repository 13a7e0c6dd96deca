//! Top-level facade crate for reqmeter.
//!
//! Re-exports the naming core and the gateway integration so users can depend on a single crate.

pub mod core {
    pub use reqmeter_core::*;
}

pub mod gateway {
    pub use reqmeter_gateway::*;
}
