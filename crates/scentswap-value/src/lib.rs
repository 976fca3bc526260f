//! # scentswap-value — Pure Valuation Engines
//!
//! The three side-effect-free computations of the ScentSwap Stack:
//!
//! - **Valuation** (`valuation.rs`): item attributes → monetary estimate
//!   with a full factor breakdown. Rate and multiplier tables are injected
//!   via [`ValuationConfig`], never hardcoded module constants.
//!
//! - **Fairness** (`fairness.rs`): two valued bundles → a 0–100 balance
//!   score, the direction of imbalance, and remediation suggestions.
//!
//! - **Matching** (`matching.rs`): a user's holdings plus the active pool →
//!   ranked trade suggestions with human-readable reasons.
//!
//! ## Design
//!
//! Everything in this crate is a pure function over its arguments: no I/O,
//! no shared mutable state, no locking. All three engines are safely
//! callable from any number of concurrent callers and trivially
//! parallelizable across listings. Estimates are exactly that — estimates,
//! not guarantees — and every number comes with the factors that produced
//! it so downstream surfaces (negotiation UI, dispute review) can show the
//! working.

pub mod config;
pub mod fairness;
pub mod matching;
pub mod valuation;

// ─── Configuration re-exports ───────────────────────────────────────

pub use config::{
    BrandTier, ConditionMultipliers, PackagingMultipliers, StorageMultipliers, TierRates,
    ValuationConfig,
};

// ─── Valuation re-exports ───────────────────────────────────────────

pub use valuation::{valuate, valuate_with_signal, MarketSignal, ValuedItem};

// ─── Fairness re-exports ────────────────────────────────────────────

pub use fairness::{compare, FairnessResult, FairnessStatus};

// ─── Matching re-exports ────────────────────────────────────────────

pub use matching::{bundle_fingerprint, suggest, MatchConfig, MatchSuggestion};
