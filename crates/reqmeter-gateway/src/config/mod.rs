//! Gateway config loader (strict parsing).

pub mod schema;

use std::fs;

use reqmeter_core::error::{ReqMeterError, Result};

pub use schema::{CancelPolicy, GatewayConfig, GroupEntry, MetricsSection, ServerSection};

pub fn load_from_file(path: &str) -> Result<GatewayConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| ReqMeterError::Internal(format!("read config failed ({path}): {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<GatewayConfig> {
    let mut cfg: GatewayConfig = serde_yaml::from_str(s)
        .map_err(|e| ReqMeterError::BadConfig(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
