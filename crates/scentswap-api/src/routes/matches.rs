//! # Match Suggestion Route
//!
//! Routes:
//! - POST /v1/matches — ranked suggestions for a requester's holdings and
//!   wish signals against the current listing pool

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;

use scentswap_core::{Item, UserId};
use scentswap_value::{suggest, MatchSuggestion};

use crate::error::AppError;
use crate::state::AppState;

/// Suggestion router.
pub fn router() -> Router<AppState> {
    Router::new().route("/v1/matches", post(create_matches))
}

#[derive(Debug, Deserialize)]
struct MatchRequest {
    requester_id: UserId,
    #[serde(default)]
    holdings: Vec<Item>,
    #[serde(default)]
    wish_signals: Vec<String>,
}

async fn create_matches(
    State(state): State<AppState>,
    Json(request): Json<MatchRequest>,
) -> Result<Json<Vec<MatchSuggestion>>, AppError> {
    for item in &request.holdings {
        item.validate()?;
    }
    let pool = state.listings.listings();
    Ok(Json(suggest(
        &request.requester_id,
        &request.holdings,
        &pool,
        &request.wish_signals,
        &state.valuation,
        &state.matching,
    )))
}
