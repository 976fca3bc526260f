//! # `screen` Subcommand
//!
//! Runs the message safety filter over a string and prints the
//! [`scentswap_safety::ScreenResult`] as pretty JSON.

use scentswap_safety::{ScreeningConfig, ScreeningEngine};

/// Arguments for `scentswap screen`.
#[derive(clap::Args, Debug)]
pub struct ScreenArgs {
    /// The message text to screen.
    pub message: String,
}

/// Run the subcommand.
pub fn run(args: &ScreenArgs) -> anyhow::Result<()> {
    let engine = ScreeningEngine::new(ScreeningConfig::default())?;
    let result = engine.screen(&args.message);
    if let Some(category) = result.blocked_category {
        tracing::warn!(category = %category, "message would be blocked");
    }
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
