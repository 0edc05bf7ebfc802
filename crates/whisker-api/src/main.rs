//! Whisker CLI entry point.
//!
//! Binary name: `whisker`
//!
//! Loads configuration, sets up tracing, then dispatches to the requested
//! command.

mod cli;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use cli::{Cli, Commands};
use whisker_api::config::{load_global_config, DEFAULT_CONFIG_FILE};
use whisker_observe::tracing_setup::{init_tracing, shutdown_tracing, LogFormat};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    let loaded = load_global_config(&config_path).await;
    let config = &loaded.config;

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,whisker=debug",
        _ => "trace",
    };
    init_tracing(
        filter,
        LogFormat::from_json_flag(config.log.json),
        config.log.otel,
    )
    .map_err(|e| anyhow::anyhow!(e))?;
    loaded.log_outcome(&config_path);

    let code = match cli.command {
        Commands::Decode { query } => {
            if cli::decode::decode_query(&query, &config.params, cli.json)? {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(2)
            }
        }
        Commands::SortKeys => {
            cli::decode::list_sort_keys(cli.json)?;
            ExitCode::SUCCESS
        }
    };

    shutdown_tracing();
    Ok(code)
}
