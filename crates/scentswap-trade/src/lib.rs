//! # scentswap-trade — The Swap Lifecycle
//!
//! The authoritative lifecycle controller for a proposed trade. This is the
//! only crate in the stack with shared mutable state, and therefore the only
//! one with a concurrency discipline.
//!
//! ## State Machine
//!
//! ```text
//! Proposed ──▶ Negotiating ⇄ Accepted ──▶ Locked ──▶ Shipping ──▶ Completed
//!    │              │            │                       │            │
//!    └──────────────┴────────────┴──▶ Cancelled          └────────────┴──▶ Disputed
//! ```
//!
//! States are an enum with validated transitions rather than typestates:
//! swap actions arrive dynamically over an API surface, so the set of legal
//! transitions must be checkable at runtime against whatever action a caller
//! sends. Invalid transitions are rejected with structured errors naming the
//! guard that failed.
//!
//! ## Concurrency
//!
//! Every mutation goes through [`SwapStore`] under optimistic concurrency
//! control: the caller presents the version it read, and a mismatch is a
//! [`TradeError::Conflict`] — re-read and retry, not data corruption. Swap
//! mutations are infrequent, independent per swap id, and separated by
//! human-scale latency, so versioned compare-and-swap beats a mutex per
//! swap and a global lock would serve no one. Cross-swap soft-locking on
//! acceptance runs inside the single store write section as a short
//! transaction scoped to the affected item set.
//!
//! ## Side Effects
//!
//! The state machine never reaches into listing storage. Lock and release
//! side effects are emitted as [`SwapEvent`]s on an outbox that the listing
//! and notification collaborators drain.

pub mod directory;
pub mod error;
pub mod event;
pub mod message;
pub mod store;
pub mod swap;

// ─── Swap re-exports ────────────────────────────────────────────────

pub use swap::{
    DisputeOutcome, DisputeRecord, DisputeResolution, Role, ShipmentRecord, Swap, SwapAction,
    SwapStatus, SwapTransitionRecord,
};

// ─── Store re-exports ───────────────────────────────────────────────

pub use store::SwapStore;

// ─── Collaborator re-exports ────────────────────────────────────────

pub use directory::{InMemoryListingStore, ItemDirectory};
pub use error::TradeError;
pub use event::SwapEvent;
pub use message::{MessageSender, SwapMessage};
