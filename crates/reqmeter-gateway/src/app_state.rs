//! Shared application state for the reqmeter gateway.
//!
//! Compiles the grouping table once at startup and shares the registry and
//! instrumenter between the router and the shutdown path.

use std::sync::Arc;

use reqmeter_core::error::Result;

use crate::config::GatewayConfig;
use crate::instrument::RequestInstrumenter;
use crate::obs::MetricsRegistry;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
    registry: Arc<MetricsRegistry>,
    instrumenter: Arc<RequestInstrumenter>,
}

struct AppStateInner {
    cfg: GatewayConfig,
}

impl AppState {
    /// Build application state from a config that went through `validate`.
    /// Returns Result so main can handle errors gracefully (no panic).
    pub fn new(cfg: GatewayConfig) -> Result<Self> {
        let rules = cfg.metrics.grouping_rules().clone();
        let registry = Arc::new(MetricsRegistry::new(cfg.metrics.max_names));
        let instrumenter = Arc::new(RequestInstrumenter::new(
            Arc::clone(&registry) as Arc<dyn reqmeter_core::MetricsSink>,
            rules,
            cfg.metrics.on_cancel,
        ));

        for r in instrumenter.rules().iter() {
            tracing::info!(group = %r.name(), "request metric group");
        }
        if !cfg.metrics.request_timing {
            tracing::warn!("metrics.request_timing disabled; requests will not be recorded");
        }

        Ok(Self {
            inner: Arc::new(AppStateInner { cfg }),
            registry,
            instrumenter,
        })
    }

    pub fn cfg(&self) -> &GatewayConfig {
        &self.inner.cfg
    }

    pub fn registry(&self) -> Arc<MetricsRegistry> {
        Arc::clone(&self.registry)
    }

    pub fn instrumenter(&self) -> Arc<RequestInstrumenter> {
        Arc::clone(&self.instrumenter)
    }
}
