//! The HTTP surface end-to-end: populate the pool, propose, transition,
//! and message through the router, asserting status codes and bodies.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use scentswap_api::{router, AppState};
use scentswap_core::{Condition, Item, UserId};
use scentswap_safety::ScreeningConfig;
use scentswap_value::{MatchConfig, ValuationConfig};

fn app() -> Router {
    let state = AppState::new(
        ValuationConfig::default(),
        MatchConfig::default(),
        ScreeningConfig::default(),
    )
    .expect("screening patterns compile");
    router(state)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(body) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

fn item(brand: &str, size: u32, fill: u8) -> Item {
    Item::new(brand, size, fill, Condition::Good).unwrap()
}

#[tokio::test]
async fn valuation_route_returns_the_factor_breakdown() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/v1/valuations",
        Some(json!({ "item": item("Chanel", 100, 80) })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["base_value"], 25_000);
    assert_eq!(body["adjusted_value"], 17_000);
    assert_eq!(body["factors"]["fill_level"], 0.8);
    assert_eq!(body["tier"], "Designer");
}

#[tokio::test]
async fn invalid_item_is_a_422() {
    let app = app();
    let mut bad = item("Chanel", 100, 80);
    bad.size_ml = 0;
    let (status, body) = send(
        &app,
        Method::POST,
        "/v1/valuations",
        Some(json!({ "item": bad })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], 422);
}

#[tokio::test]
async fn fairness_route_compares_bundles() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/v1/fairness",
        Some(json!({
            "initiator_items": [item("Chanel", 100, 80)],
            "recipient_items": [item("Dior", 100, 80)],
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["score"], 100);
    assert_eq!(body["status"], "Excellent");
}

#[tokio::test]
async fn swap_lifecycle_over_http() {
    let app = app();
    let alice = UserId::new();
    let bob = UserId::new();
    let alice_item = item("Chanel", 100, 80);
    let bob_item = item("Dior", 100, 85);

    // Populate the pool.
    for (owner, title, listed) in [
        (alice, "Bleu de Chanel", &alice_item),
        (bob, "Sauvage", &bob_item),
    ] {
        let (status, _) = send(
            &app,
            Method::POST,
            "/v1/listings",
            Some(json!({ "owner_id": owner, "title": title, "item": listed })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    // Propose.
    let (status, swap) = send(
        &app,
        Method::POST,
        "/v1/swaps",
        Some(json!({
            "initiator_id": alice,
            "recipient_id": bob,
            "initiator_items": [alice_item.id],
            "recipient_items": [bob_item.id],
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(swap["status"], "Proposed");
    assert_eq!(swap["version"], 1);
    let swap_id = swap["id"].as_str().unwrap().to_string();

    // The initiator accepting is forbidden.
    let (status, _) = send(
        &app,
        Method::POST,
        &format!("/v1/swaps/{swap_id}/transition"),
        Some(json!({
            "action": { "type": "accept" },
            "actor_id": alice,
            "expected_version": 1,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // The recipient accepting works; listings go Reserved.
    let (status, accepted) = send(
        &app,
        Method::POST,
        &format!("/v1/swaps/{swap_id}/transition"),
        Some(json!({
            "action": { "type": "accept" },
            "actor_id": bob,
            "expected_version": 1,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(accepted["status"], "Accepted");
    assert_eq!(accepted["version"], 2);

    let (_, listings) = send(&app, Method::GET, "/v1/listings", None).await;
    assert!(listings
        .as_array()
        .unwrap()
        .iter()
        .all(|l| l["status"] == "Reserved"));

    // A stale version conflicts.
    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/v1/swaps/{swap_id}/transition"),
        Some(json!({
            "action": { "type": "lock" },
            "actor_id": alice,
            "expected_version": 1,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], 409);

    // A flagged message is stored and reported as flagged.
    let (status, message) = send(
        &app,
        Method::POST,
        &format!("/v1/swaps/{swap_id}/messages"),
        Some(json!({
            "sender": { "kind": "participant", "user_id": alice },
            "body": "just zelle me the difference",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(message["flagged"], true);

    let (_, fetched) = send(&app, Method::GET, &format!("/v1/swaps/{swap_id}"), None).await;
    assert_eq!(fetched["flagged_for_review"], true);
    assert_eq!(fetched["messages"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn matches_route_ranks_the_pool() {
    let app = app();
    let seller = UserId::new();
    let candidate = item("Le Labo", 50, 100);
    send(
        &app,
        Method::POST,
        "/v1/listings",
        Some(json!({ "owner_id": seller, "title": "Santal 33", "item": candidate })),
    )
    .await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/v1/matches",
        Some(json!({
            "requester_id": UserId::new(),
            "wish_signals": ["santal"],
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let suggestions = body.as_array().unwrap();
    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0]["score"], 80);
    assert!(suggestions[0]["reasons"][0]
        .as_str()
        .unwrap()
        .contains("santal"));
}

#[tokio::test]
async fn unknown_swap_is_a_404_and_metrics_route_is_off_without_recorder() {
    let app = app();
    let (status, _) = send(
        &app,
        Method::GET,
        &format!("/v1/swaps/{}", uuid::Uuid::new_v4()),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::GET, "/metrics", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
}
