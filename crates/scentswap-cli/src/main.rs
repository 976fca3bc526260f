//! # scentswap CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules.

use clap::Parser;

/// ScentSwap Stack CLI — fragrance barter marketplace toolchain.
///
/// Values items, compares bundle fairness, ranks trade suggestions,
/// screens messages, and serves the HTTP API.
#[derive(Parser, Debug)]
#[command(name = "scentswap", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Value one item from a JSON/YAML description.
    Valuate(scentswap_cli::valuate::ValuateArgs),
    /// Compare the fairness of two bundles.
    Fairness(scentswap_cli::fairness::FairnessArgs),
    /// Rank a listing pool against holdings and wish signals.
    Suggest(scentswap_cli::suggest::SuggestArgs),
    /// Run the message safety filter over a string.
    Screen(scentswap_cli::screen::ScreenArgs),
    /// Serve the HTTP API.
    Serve(scentswap_cli::serve::ServeArgs),
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so JSON output on stdout stays pipeable.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Valuate(args) => scentswap_cli::valuate::run(&args),
        Commands::Fairness(args) => scentswap_cli::fairness::run(&args),
        Commands::Suggest(args) => scentswap_cli::suggest::run(&args),
        Commands::Screen(args) => scentswap_cli::screen::run(&args),
        Commands::Serve(args) => scentswap_cli::serve::run(&args),
    }
}
