//! # scentswap-safety — In-Swap Message Screening
//!
//! A barter platform with no money flow attracts exactly one kind of scam:
//! moving the money flow somewhere the platform cannot see it. This crate
//! screens free-text messages exchanged inside a swap for payment
//! solicitation and off-platform redirection.
//!
//! ## Pattern Classes
//!
//! - **Bank details** — account-like digit runs, IBAN shapes, banking
//!   keywords. Blocking.
//! - **Suspicious payment** — cash-equivalent instruments: money orders,
//!   gift cards, cryptocurrency, payment apps. Blocking.
//! - **Off-platform redirect** — social handles, e-mail and phone shapes,
//!   contact phrases. Warning only: the platform cannot and should not
//!   prevent all human contact, only discourage circumvention of its
//!   protections.
//!
//! A blocked message is still stored by the caller but flagged; it is never
//! silently discarded, preserving the audit trail for disputes.
//!
//! ## Design
//!
//! Keyword tables are injected via [`ScreeningConfig`]; structural patterns
//! compile once at [`ScreeningEngine`] construction. Screening itself is a
//! pure function over the engine — no I/O, no shared mutable state.

pub mod screen;

pub use screen::{
    BlockedCategory, ScreenResult, ScreeningConfig, ScreeningEngine, ScreeningError,
};
