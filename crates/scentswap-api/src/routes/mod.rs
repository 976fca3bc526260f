//! # Route Modules
//!
//! One module per surface, each exporting a `router()` merged by the crate
//! root, plus the unauthenticated probe handlers.

use axum::extract::State;
use axum::http::StatusCode;

use crate::state::AppState;

pub mod listings;
pub mod matches;
pub mod swaps;
pub mod valuations;

/// Liveness probe.
pub async fn health() -> &'static str {
    "ok"
}

/// Prometheus rendering, when the recorder is installed.
pub async fn metrics(State(state): State<AppState>) -> Result<String, StatusCode> {
    state
        .metrics
        .as_ref()
        .map(|handle| handle.render())
        .ok_or(StatusCode::NOT_FOUND)
}
