//! # Listing Pool Routes
//!
//! The listing store proper is an external collaborator; these routes
//! drive the in-process stand-in so a self-contained deployment can be
//! populated and inspected.
//!
//! Routes:
//! - POST /v1/listings — create a listing
//! - GET  /v1/listings — snapshot of the pool

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;

use scentswap_core::{Item, Listing, UserId};

use crate::error::AppError;
use crate::state::AppState;

/// Listing router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/listings", post(create_listing).get(list_listings))
        .route("/v1/listings/{id}", get(get_listing))
}

#[derive(Debug, Deserialize)]
struct CreateListingRequest {
    owner_id: UserId,
    title: String,
    item: Item,
}

async fn create_listing(
    State(state): State<AppState>,
    Json(request): Json<CreateListingRequest>,
) -> Result<Json<Listing>, AppError> {
    request.item.validate()?;
    if request.title.trim().is_empty() {
        return Err(AppError::Validation("listing title must not be empty".into()));
    }
    let listing = Listing::new(request.owner_id, request.title, request.item);
    state.listings.insert(listing.clone());
    Ok(Json(listing))
}

async fn list_listings(State(state): State<AppState>) -> Json<Vec<Listing>> {
    Json(state.listings.listings())
}

async fn get_listing(
    State(state): State<AppState>,
    axum::extract::Path(id): axum::extract::Path<uuid::Uuid>,
) -> Result<Json<Listing>, AppError> {
    state
        .listings
        .get(&scentswap_core::ListingId(id))
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("listing:{id}")))
}
