//! # `fairness` Subcommand
//!
//! Compares two bundles of items (each a JSON/YAML array) and prints the
//! [`scentswap_value::FairnessResult`] as pretty JSON.

use std::path::PathBuf;

use scentswap_core::Item;
use scentswap_value::{compare, valuate, ValuedItem};

use crate::input;

/// Arguments for `scentswap fairness`.
#[derive(clap::Args, Debug)]
pub struct FairnessArgs {
    /// Initiator bundle: array of item descriptions (JSON or YAML).
    #[arg(long)]
    pub initiator: PathBuf,

    /// Recipient bundle: array of item descriptions (JSON or YAML).
    #[arg(long)]
    pub recipient: PathBuf,

    /// Valuation config (YAML) overriding the built-in tables.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Run the subcommand.
pub fn run(args: &FairnessArgs) -> anyhow::Result<()> {
    let initiator_items: Vec<Item> = input::load(&args.initiator)?;
    let recipient_items: Vec<Item> = input::load(&args.recipient)?;
    for item in initiator_items.iter().chain(&recipient_items) {
        item.validate()?;
    }
    let config = input::load_valuation_config(args.config.as_deref())?;

    let initiator: Vec<ValuedItem> = initiator_items
        .iter()
        .map(|item| valuate(item, &config))
        .collect();
    let recipient: Vec<ValuedItem> = recipient_items
        .iter()
        .map(|item| valuate(item, &config))
        .collect();

    let result = compare(&initiator, &recipient);
    tracing::info!(score = result.score, status = %result.status, "bundles compared");
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
