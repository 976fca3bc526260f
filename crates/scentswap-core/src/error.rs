//! # Error Types — The Core Taxonomy
//!
//! Defines the error classes shared across the ScentSwap Stack. All errors
//! use `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - `Validation` is the caller's fault and always recoverable by correcting
//!   input.
//! - `Authorization` means the actor is not permitted to perform the action
//!   on this resource.
//! - `Conflict` is an optimistic-concurrency version mismatch; the caller
//!   should re-read and retry. It is not data corruption.
//! - `ExternalDependency` covers unavailable collaborators; pure engines
//!   degrade to documented defaults instead of raising it wherever a sane
//!   default exists.
//!
//! The swap lifecycle has its own richer error enum in `scentswap-trade`
//! that follows the same classes and adds the failed-guard detail.

use thiserror::Error;

/// Shared error taxonomy for the ScentSwap Stack.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Malformed or empty input — the caller's fault, correct and retry.
    #[error("validation error: {0}")]
    Validation(String),

    /// The actor is not permitted to perform this action.
    #[error("authorization error: {0}")]
    Authorization(String),

    /// Optimistic-concurrency version mismatch — re-read and retry.
    #[error("version conflict: expected {expected}, current {current}")]
    Conflict {
        /// The version the caller read before attempting the write.
        expected: u64,
        /// The version actually stored.
        current: u64,
    },

    /// An external collaborator (classifier, store) is unavailable.
    #[error("external dependency unavailable: {0}")]
    ExternalDependency(String),
}
