//! Command-line interface definitions.

use std::path::PathBuf;

use clap::{ArgAction, Parser};

pub mod commands;
pub mod output;

pub use commands::Commands;

/// Rank stored form snippets for a host and query.
#[derive(Parser, Debug)]
#[command(name = "fillrank", version, about, long_about = None)]
pub struct Cli {
    /// Emit JSON on stdout for machine consumers
    #[arg(long, global = true)]
    pub robot: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Disable logging
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Config file (overrides the global config)
    #[arg(long, global = true, env = "FILLRANK_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Library snapshot exported from the editor; the sample library is used
    /// when absent
    #[arg(long, global = true, env = "FILLRANK_LIBRARY", value_name = "PATH")]
    pub library: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}
