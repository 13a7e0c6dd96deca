//! Axum router wiring.
//!
//! Every route, including the fallback, sits behind the request timing layer
//! unless `metrics.request_timing` is off.

use axum::{routing::get, Router};

use crate::{app_state::AppState, instrument::RequestTimingLayer, ops};

pub fn build_router(state: AppState) -> Router {
    let router = Router::new()
        .route("/healthz", get(ops::healthz))
        .fallback(ops::not_found);

    let router = if state.cfg().metrics.request_timing {
        router.layer(RequestTimingLayer::new(state.instrumenter()))
    } else {
        router
    };

    router.with_state(state)
}
