//! # scentswap-cli — Command-Line Interface
//!
//! Offline access to the ScentSwap engines, plus `serve` for the HTTP API.
//!
//! ## Subcommands
//!
//! - `valuate` — value one item from a JSON/YAML description
//! - `fairness` — compare two bundles of items
//! - `suggest` — rank a listing pool against holdings and wish signals
//! - `screen` — run the message safety filter over a string
//! - `serve` — run the Axum API
//!
//! ## Crate Policy
//!
//! - CLI construction (argument parsing) is separated from business logic.
//! - Handler functions delegate to the domain crates — no business logic
//!   here.
//! - Output is JSON on stdout, logs on stderr, so commands compose in
//!   pipelines.

pub mod fairness;
pub mod input;
pub mod screen;
pub mod serve;
pub mod suggest;
pub mod valuate;
