//! # `serve` Subcommand
//!
//! Builds the application state, installs the Prometheus recorder, and
//! serves the Axum API.

use std::path::PathBuf;

use scentswap_api::AppState;
use scentswap_safety::ScreeningConfig;
use scentswap_value::MatchConfig;

use crate::input;

/// Arguments for `scentswap serve`.
#[derive(clap::Args, Debug)]
pub struct ServeArgs {
    /// Address to bind.
    #[arg(long, default_value = "127.0.0.1:8080")]
    pub addr: String,

    /// Valuation config (YAML) overriding the built-in tables.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Run the subcommand.
pub fn run(args: &ServeArgs) -> anyhow::Result<()> {
    let valuation = input::load_valuation_config(args.config.as_deref())?;
    let state = AppState::new(
        valuation,
        MatchConfig::default(),
        ScreeningConfig::default(),
    )?
    .with_metrics()?;
    let app = scentswap_api::router(state);

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let listener = tokio::net::TcpListener::bind(&args.addr).await?;
        tracing::info!(addr = %args.addr, "scentswap api listening");
        axum::serve(listener, app).await?;
        anyhow::Ok(())
    })
}
