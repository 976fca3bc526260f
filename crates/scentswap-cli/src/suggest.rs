//! # `suggest` Subcommand
//!
//! Ranks a listing pool against a requester's holdings and wish signals
//! and prints the suggestions as pretty JSON.

use std::path::PathBuf;

use uuid::Uuid;

use scentswap_core::{Item, Listing, UserId};
use scentswap_value::{bundle_fingerprint, suggest, MatchConfig};

use crate::input;

/// Arguments for `scentswap suggest`.
#[derive(clap::Args, Debug)]
pub struct SuggestArgs {
    /// The requester's user id.
    #[arg(long)]
    pub requester: Uuid,

    /// Holdings: array of item descriptions (JSON or YAML).
    #[arg(long)]
    pub holdings: Option<PathBuf>,

    /// Candidate pool: array of listings (JSON or YAML).
    #[arg(long)]
    pub pool: PathBuf,

    /// Wish signal; repeatable.
    #[arg(long = "wish")]
    pub wishes: Vec<String>,

    /// Valuation config (YAML) overriding the built-in tables.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Run the subcommand.
pub fn run(args: &SuggestArgs) -> anyhow::Result<()> {
    let holdings: Vec<Item> = match &args.holdings {
        Some(path) => input::load(path)?,
        None => Vec::new(),
    };
    for item in &holdings {
        item.validate()?;
    }
    let pool: Vec<Listing> = input::load(&args.pool)?;
    let valuation = input::load_valuation_config(args.config.as_deref())?;

    let suggestions = suggest(
        &UserId(args.requester),
        &holdings,
        &pool,
        &args.wishes,
        &valuation,
        &MatchConfig::default(),
    );
    tracing::info!(
        count = suggestions.len(),
        holdings = %bundle_fingerprint(&holdings),
        "suggestions ranked"
    );
    println!("{}", serde_json::to_string_pretty(&suggestions)?);
    Ok(())
}
