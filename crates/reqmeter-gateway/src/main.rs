//! reqmeter gateway
//!
//! - Loads `REQMETER_CONFIG` (default `reqmeter.yaml`)
//! - Serves the demo router behind the request timing layer
//! - Logs the registry snapshot on Ctrl-C shutdown

use tracing_subscriber::{fmt, EnvFilter};

use reqmeter_core::error::{ReqMeterError, Result};
use reqmeter_gateway::{app_state, config, router};

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let path = std::env::var("REQMETER_CONFIG").unwrap_or_else(|_| "reqmeter.yaml".into());
    let cfg = config::load_from_file(&path)?;
    let listen = cfg.server.listen_addr()?;

    let state = app_state::AppState::new(cfg)?;
    let registry = state.registry();
    let app = router::build_router(state);

    tracing::info!(%listen, config = %path, "reqmeter-gateway starting");
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| ReqMeterError::Internal(format!("bind {listen} failed: {e}")))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ReqMeterError::Internal(format!("server failed: {e}")))?;

    match serde_json::to_string(&registry.snapshot()) {
        Ok(json) => tracing::info!(snapshot = %json, "reqmeter-gateway stopped"),
        Err(e) => tracing::warn!(error = %e, "snapshot serialization failed"),
    }
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "ctrl-c handler failed; shutting down");
    }
}
