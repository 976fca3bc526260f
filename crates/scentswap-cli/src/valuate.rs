//! # `valuate` Subcommand
//!
//! Values one item from a file description and prints the full
//! [`scentswap_value::ValuedItem`] — estimate plus factor breakdown — as
//! pretty JSON.

use std::path::PathBuf;

use scentswap_value::{valuate_with_signal, MarketSignal};

use crate::input;

/// Arguments for `scentswap valuate`.
#[derive(clap::Args, Debug)]
pub struct ValuateArgs {
    /// Item description (JSON or YAML).
    #[arg(long)]
    pub item: PathBuf,

    /// Optional market signal (JSON or YAML).
    #[arg(long)]
    pub signal: Option<PathBuf>,

    /// Valuation config (YAML) overriding the built-in tables.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Run the subcommand.
pub fn run(args: &ValuateArgs) -> anyhow::Result<()> {
    let item: scentswap_core::Item = input::load(&args.item)?;
    item.validate()?;

    let signal = match &args.signal {
        Some(path) => input::load(path)?,
        None => MarketSignal::default(),
    };
    let config = input::load_valuation_config(args.config.as_deref())?;

    let valued = valuate_with_signal(&item, &signal, &config);
    tracing::info!(
        brand = %item.brand_name,
        adjusted = %valued.adjusted_value,
        "item valued"
    );
    println!("{}", serde_json::to_string_pretty(&valued)?);
    Ok(())
}
