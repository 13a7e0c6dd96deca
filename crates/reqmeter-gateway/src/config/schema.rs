use std::net::SocketAddr;

use serde::Deserialize;
use reqmeter_core::error::{ReqMeterError, Result};
use reqmeter_core::GroupingRules;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub metrics: MetricsSection,
}

impl GatewayConfig {
    /// Validate and compile derived state (grouping regexes).
    pub fn validate(&mut self) -> Result<()> {
        if self.version != 1 {
            return Err(ReqMeterError::UnsupportedVersion);
        }

        self.server.validate()?;
        self.metrics.validate()?;

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr().map(|_| ())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|e| {
            ReqMeterError::BadConfig(format!("server.listen must be a socket address: {e}"))
        })
    }
}

fn default_listen() -> String {
    "0.0.0.0:8080".into()
}

/// What to write when a request is dropped before it produced a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CancelPolicy {
    /// Bump the `cancelled-requests` counter once.
    #[default]
    Count,
    /// Write nothing.
    Skip,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetricsSection {
    #[serde(default = "default_request_timing")]
    pub request_timing: bool,

    #[serde(default)]
    pub on_cancel: CancelPolicy,

    #[serde(default = "default_max_names")]
    pub max_names: usize,

    /// Ordered: the first entry whose pattern matches the whole path wins.
    #[serde(default)]
    pub request_metric_groups: Vec<GroupEntry>,

    /// Compiled form of `request_metric_groups`, filled by `validate`.
    #[serde(skip)]
    compiled_groups: GroupingRules,
}

impl Default for MetricsSection {
    fn default() -> Self {
        Self {
            request_timing: default_request_timing(),
            on_cancel: CancelPolicy::default(),
            max_names: default_max_names(),
            request_metric_groups: Vec::new(),
            compiled_groups: GroupingRules::empty(),
        }
    }
}

impl MetricsSection {
    pub fn validate(&mut self) -> Result<()> {
        if !(1..=1_000_000).contains(&self.max_names) {
            return Err(ReqMeterError::BadConfig(
                "metrics.max_names must be between 1 and 1000000".into(),
            ));
        }
        // Regex errors surface here, at load time.
        self.compiled_groups = GroupingRules::compile(
            self.request_metric_groups
                .iter()
                .map(|g| (g.name.as_str(), g.pattern.as_str())),
        )?;
        Ok(())
    }

    /// Grouping table compiled by `validate`, in declared order.
    pub fn grouping_rules(&self) -> &GroupingRules {
        &self.compiled_groups
    }
}

fn default_request_timing() -> bool {
    true
}
fn default_max_names() -> usize {
    10_000
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GroupEntry {
    pub name: String,
    pub pattern: String,
}
