//! triage-lambda
//!
//! HTTP surface of the triage responder: the signed webhook route, the
//! per-request pipeline and the startup wiring shared by the Lambda and
//! local entry points.

use axum::Router;
use axum::middleware as axum_mw;
use axum::routing::{get, post};

pub mod config;
pub mod error;
pub mod middleware;
pub mod pipeline;
pub mod routes;
pub mod state;

use state::AppState;

/// Build the router. The same app runs under `lambda_http` and `axum::serve`.
pub fn app(state: AppState) -> Router {
    Router::new()
        // Health (no signature)
        .route("/health", get(routes::health::health_check))
        // Provider webhook (signed)
        .route("/webhook", post(routes::webhook::receive_message))
        .layer(axum_mw::from_fn(middleware::audit::request_log))
        .with_state(state)
}
