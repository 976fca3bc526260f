//! # Trade Errors
//!
//! The swap lifecycle is the only component permitted to reject an
//! operation outright, and every rejection names the guard that failed —
//! wrong actor, wrong state, or stale version — so the caller knows whether
//! to retry, refresh, or stop.

use thiserror::Error;

use scentswap_core::CoreError;

/// Errors from swap lifecycle operations.
#[derive(Error, Debug)]
pub enum TradeError {
    /// Malformed input: empty bundle, unknown or unowned item, blank
    /// dispute reason. Correct the input and retry.
    #[error("validation error: {0}")]
    Validation(String),

    /// The actor may not perform this action on this swap.
    #[error("authorization error: {0}")]
    Authorization(String),

    /// The action is not legal from the swap's current status.
    #[error("invalid swap transition: {action} from {from}")]
    InvalidTransition {
        /// The swap's current status.
        from: String,
        /// The attempted action.
        action: String,
    },

    /// Optimistic-concurrency mismatch: someone else wrote first.
    /// Re-read the swap and retry against the current version.
    #[error("version conflict: expected {expected}, current {current}")]
    Conflict {
        /// The version the caller presented.
        expected: u64,
        /// The version actually stored.
        current: u64,
    },

    /// No swap with that id.
    #[error("swap not found: {0}")]
    NotFound(String),

    /// A collaborator (listing store, classifier) is unavailable.
    #[error("external dependency unavailable: {0}")]
    ExternalDependency(String),
}

impl From<CoreError> for TradeError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(msg) => Self::Validation(msg),
            CoreError::Authorization(msg) => Self::Authorization(msg),
            CoreError::Conflict { expected, current } => Self::Conflict { expected, current },
            CoreError::ExternalDependency(msg) => Self::ExternalDependency(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_errors_map_onto_the_same_classes() {
        let err: TradeError = CoreError::Validation("empty bundle".into()).into();
        assert!(matches!(err, TradeError::Validation(_)));

        let err: TradeError = CoreError::Conflict {
            expected: 1,
            current: 2,
        }
        .into();
        assert!(matches!(err, TradeError::Conflict { expected: 1, current: 2 }));
    }
}
