//! CLI command definitions for the `whisker` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod decode;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Inspect how flow-listing queries are decoded and validated.
#[derive(Parser)]
#[command(name = "whisker", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to the configuration file.
    #[arg(long, global = true, env = "WHISKER_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Decode and validate a `GET /api/v1/flows` query string.
    Decode {
        /// Raw query string, e.g. 'sortBy=destname&filters=...'.
        query: String,
    },

    /// List the accepted `sortBy` values.
    #[command(name = "sort-keys")]
    SortKeys,
}
