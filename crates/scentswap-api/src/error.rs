//! # Application Error
//!
//! Maps domain errors to structured HTTP responses. A rejected transition
//! surfaces *why* it was rejected — wrong actor (403), wrong state or bad
//! input (422), stale version (409) — so clients know whether to retry,
//! refresh, or stop.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use scentswap_core::CoreError;
use scentswap_trade::TradeError;

/// Application-level error type that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Resource not found → 404.
    NotFound(String),
    /// Malformed input or an illegal transition → 422.
    Validation(String),
    /// Actor not permitted → 403.
    Forbidden(String),
    /// Optimistic-concurrency mismatch → 409; re-read and retry.
    Conflict(String),
    /// A collaborator is unavailable → 502.
    BadGateway(String),
}

impl From<TradeError> for AppError {
    fn from(err: TradeError) -> Self {
        match err {
            TradeError::NotFound(msg) => Self::NotFound(msg),
            TradeError::Validation(msg) => Self::Validation(msg),
            TradeError::InvalidTransition { .. } => Self::Validation(err.to_string()),
            TradeError::Authorization(msg) => Self::Forbidden(msg),
            TradeError::Conflict { .. } => Self::Conflict(err.to_string()),
            TradeError::ExternalDependency(msg) => Self::BadGateway(msg),
        }
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        TradeError::from(err).into()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Validation(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::BadGateway(msg) => (StatusCode::BAD_GATEWAY, msg),
        };
        let body = serde_json::json!({
            "error": {
                "code": status.as_u16(),
                "message": message,
            }
        });
        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trade_errors_map_to_the_right_statuses() {
        let conflict: AppError = TradeError::Conflict {
            expected: 1,
            current: 2,
        }
        .into();
        assert!(matches!(conflict, AppError::Conflict(_)));

        let forbidden: AppError = TradeError::Authorization("not yours".into()).into();
        assert!(matches!(forbidden, AppError::Forbidden(_)));

        let invalid: AppError = TradeError::InvalidTransition {
            from: "PROPOSED".into(),
            action: "lock".into(),
        }
        .into();
        assert!(matches!(invalid, AppError::Validation(_)));
    }
}
