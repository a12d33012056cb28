//! Inbox Briefing CLI entry point.

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use briefing_cli::cli::Cli;
use briefing_cli::commands;

fn main() {
    // Load .env.local files before clap reads env-backed flags
    briefing_core::load_env();

    let cli = Cli::parse();

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level().to_string()));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = commands::run(&cli) {
        eprintln!("エラーが発生しました: {}", e);
        std::process::exit(1);
    }
}
