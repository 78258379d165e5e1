//! CLI command implementations
//!
//! Each subcommand has its own module with:
//! - Args struct for command-line arguments
//! - run() function to execute the command

use clap::Subcommand;

pub mod backend;
pub mod check_field;
pub mod import;
pub mod rank;
pub mod resolve;
pub mod sample;
pub mod score;

use crate::app::AppContext;
use crate::error::Result;

pub fn run(ctx: &AppContext, command: &Commands) -> Result<()> {
    match command {
        Commands::Resolve(args) => resolve::run(ctx, args),
        Commands::Rank(args) => rank::run(ctx, args),
        Commands::Score(args) => score::run(ctx, args),
        Commands::Import(args) => import::run(ctx, args),
        Commands::Sample(args) => sample::run(ctx, args),
        Commands::CheckField(args) => check_field::run(ctx, args),
        Commands::Backend(args) => backend::run(ctx, args),
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the policy the domain rules produce for a host
    Resolve(resolve::ResolveArgs),

    /// Rank library items for a host and query
    Rank(rank::RankArgs),

    /// Score one candidate string against a query
    Score(score::ScoreArgs),

    /// Deduplicate an exported library, optionally merging it into the current one
    Import(import::ImportArgs),

    /// Print the sample library
    Sample(sample::SampleArgs),

    /// Check whether a form field may receive suggestions
    CheckField(check_field::CheckFieldArgs),

    /// Report which scoring backend initialization selected
    Backend(backend::BackendArgs),
}
