//! # Valuation and Fairness Routes
//!
//! Routes:
//! - POST /v1/valuations — value one item, with an optional market signal
//! - POST /v1/fairness — compare two bundles of items

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;

use scentswap_core::Item;
use scentswap_value::{
    compare, valuate, valuate_with_signal, FairnessResult, MarketSignal, ValuedItem,
};

use crate::error::AppError;
use crate::state::AppState;

/// Valuation and fairness router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/valuations", post(create_valuation))
        .route("/v1/fairness", post(compare_fairness))
}

#[derive(Debug, Deserialize)]
struct ValuationRequest {
    item: Item,
    #[serde(default)]
    signal: MarketSignal,
}

async fn create_valuation(
    State(state): State<AppState>,
    Json(request): Json<ValuationRequest>,
) -> Result<Json<ValuedItem>, AppError> {
    request.item.validate()?;
    Ok(Json(valuate_with_signal(
        &request.item,
        &request.signal,
        &state.valuation,
    )))
}

#[derive(Debug, Deserialize)]
struct FairnessRequest {
    initiator_items: Vec<Item>,
    recipient_items: Vec<Item>,
}

async fn compare_fairness(
    State(state): State<AppState>,
    Json(request): Json<FairnessRequest>,
) -> Result<Json<FairnessResult>, AppError> {
    for item in request
        .initiator_items
        .iter()
        .chain(&request.recipient_items)
    {
        item.validate()?;
    }
    let initiator: Vec<ValuedItem> = request
        .initiator_items
        .iter()
        .map(|item| valuate(item, &state.valuation))
        .collect();
    let recipient: Vec<ValuedItem> = request
        .recipient_items
        .iter()
        .map(|item| valuate(item, &state.valuation))
        .collect();
    Ok(Json(compare(&initiator, &recipient)))
}
