//! # scentswap-core — Foundational Types for the ScentSwap Stack
//!
//! This crate is the bedrock of the ScentSwap Stack. It defines the
//! type-system primitives every other crate builds on. Every other crate in
//! the workspace depends on `scentswap-core`; it depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** `UserId`, `ItemId`,
//!    `ListingId`, `SwapId`, `MessageId` — all newtypes over `Uuid`.
//!    No bare strings for identifiers.
//!
//! 2. **Integer money.** `Money` is minor units (US cents, `i64`). Fractional
//!    intermediates exist only inside a computation and are rounded half-up
//!    exactly once at its end. No floats in stored amounts. Ever.
//!
//! 3. **UTC-only timestamps.** `Timestamp` enforces UTC with Z suffix and
//!    seconds precision; non-UTC offsets are rejected at parse time.
//!
//! 4. **Validated construction.** `Item` and `Bundle` cannot be built in an
//!    invalid shape — a zero-size bottle or an empty bundle is a
//!    `CoreError::Validation` at the constructor, not a latent defect.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `scentswap-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public types derive `Debug`, `Clone`, and implement `Serialize`/`Deserialize`.

pub mod error;
pub mod identity;
pub mod item;
pub mod money;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use error::CoreError;
pub use identity::{ItemId, ListingId, MessageId, SwapId, UserId};
pub use item::{Bundle, Condition, Item, Listing, ListingStatus, StorageHistory};
pub use money::Money;
pub use temporal::Timestamp;
