//! # Swap Lifecycle Routes
//!
//! Routes:
//! - POST /v1/swaps — propose a swap
//! - GET  /v1/swaps/{id} — read a swap
//! - GET  /v1/swaps/{id}/fairness — live fairness recomputation
//! - POST /v1/swaps/{id}/transition — participant action + expected version
//! - POST /v1/swaps/{id}/messages — screened in-swap messaging
//! - POST /v1/swaps/{id}/dispute-resolution — mediator outcome recording
//!
//! Handlers delegate to [`scentswap_trade::SwapStore`] and pump the event
//! outbox into the in-process listing pool after every write.

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use metrics::counter;
use serde::Deserialize;
use uuid::Uuid;

use scentswap_core::{ItemId, SwapId, UserId};
use scentswap_trade::{DisputeOutcome, MessageSender, Swap, SwapAction, SwapMessage};
use scentswap_value::FairnessResult;

use crate::error::AppError;
use crate::state::AppState;

/// Swap lifecycle router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/swaps", post(propose_swap))
        .route("/v1/swaps/{id}", get(get_swap))
        .route("/v1/swaps/{id}/fairness", get(get_fairness))
        .route("/v1/swaps/{id}/transition", post(transition_swap))
        .route("/v1/swaps/{id}/messages", post(append_message))
        .route("/v1/swaps/{id}/dispute-resolution", post(resolve_dispute))
}

#[derive(Debug, Deserialize)]
struct ProposeRequest {
    initiator_id: UserId,
    recipient_id: UserId,
    initiator_items: Vec<ItemId>,
    recipient_items: Vec<ItemId>,
}

async fn propose_swap(
    State(state): State<AppState>,
    Json(request): Json<ProposeRequest>,
) -> Result<Json<Swap>, AppError> {
    let swap = state.store.propose(
        request.initiator_id,
        request.recipient_id,
        request.initiator_items,
        request.recipient_items,
    )?;
    tracing::info!(swap = %swap.id, score = swap.fairness_snapshot.score, "swap proposed over http");
    counter!("scentswap_swaps_proposed_total").increment(1);
    state.pump_events();
    Ok(Json(swap))
}

async fn get_swap(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Swap>, AppError> {
    Ok(Json(state.store.get(&SwapId(id))?))
}

async fn get_fairness(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<FairnessResult>, AppError> {
    Ok(Json(state.store.current_fairness(&SwapId(id))?))
}

#[derive(Debug, Deserialize)]
struct TransitionRequest {
    action: SwapAction,
    actor_id: UserId,
    expected_version: u64,
}

async fn transition_swap(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<TransitionRequest>,
) -> Result<Json<Swap>, AppError> {
    let action_name = request.action.name();
    let swap = state.store.transition(
        &SwapId(id),
        request.action,
        &request.actor_id,
        request.expected_version,
    )?;
    counter!("scentswap_swap_transitions_total", "action" => action_name).increment(1);
    state.pump_events();
    Ok(Json(swap))
}

#[derive(Debug, Deserialize)]
struct MessageRequest {
    sender: MessageSender,
    body: String,
}

async fn append_message(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<MessageRequest>,
) -> Result<Json<SwapMessage>, AppError> {
    let message = state
        .store
        .append_message(&SwapId(id), request.sender, &request.body)?;
    if message.flagged {
        counter!("scentswap_messages_flagged_total").increment(1);
    }
    state.pump_events();
    Ok(Json(message))
}

#[derive(Debug, Deserialize)]
struct ResolveDisputeRequest {
    outcome: DisputeOutcome,
    note: String,
    expected_version: u64,
}

async fn resolve_dispute(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<ResolveDisputeRequest>,
) -> Result<Json<Swap>, AppError> {
    let swap = state.store.resolve_dispute(
        &SwapId(id),
        request.outcome,
        &request.note,
        request.expected_version,
    )?;
    state.pump_events();
    Ok(Json(swap))
}
