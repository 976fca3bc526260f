//! # scentswap-api — Axum API Surface
//!
//! The HTTP surface over the ScentSwap engines, built on Axum/Tower/Tokio.
//!
//! ## Routes
//!
//! - `POST /v1/valuations` — value one item (optional market signal)
//! - `POST /v1/fairness` — compare two bundles of items
//! - `POST /v1/matches` — ranked trade suggestions for a requester
//! - `POST /v1/listings`, `GET /v1/listings` — the in-process listing pool
//! - `POST /v1/swaps` — propose a swap
//! - `GET  /v1/swaps/{id}` — read a swap
//! - `GET  /v1/swaps/{id}/fairness` — live fairness recomputation
//! - `POST /v1/swaps/{id}/transition` — participant actions under
//!   compare-and-swap
//! - `POST /v1/swaps/{id}/messages` — screened in-swap messaging
//! - `POST /v1/swaps/{id}/dispute-resolution` — mediator outcome recording
//! - `GET  /health`, `GET /metrics` — probes and Prometheus rendering
//!
//! ## Crate Policy
//!
//! - No business logic in route handlers — they validate shape, delegate to
//!   the domain crates, and map errors.
//! - All errors map to structured HTTP responses via [`AppError`].
//! - Middleware: request tracing and permissive CORS via `tower-http`.

use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod error;
pub mod routes;
pub mod state;

pub use error::AppError;
pub use state::AppState;

/// Assemble the full application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health))
        .route("/metrics", get(routes::metrics))
        .merge(routes::valuations::router())
        .merge(routes::matches::router())
        .merge(routes::listings::router())
        .merge(routes::swaps::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
