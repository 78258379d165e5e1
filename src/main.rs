//! fillrank - form snippet ranking CLI
//!
//! Resolves per-site rules and ranks library items for a host and query.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use fillrank::{FillError, Result};
use fillrank::app::AppContext;
use fillrank::cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err, cli.robot);
            ExitCode::FAILURE
        }
    }
}

/// Robot callers parse stdout, so the error goes there as one JSON line.
fn report_error(err: &FillError, robot: bool) {
    if !robot {
        eprintln!("Error: {err}");
        return;
    }
    let payload = serde_json::json!({
        "error": true,
        "code": err.code(),
        "message": err.to_string(),
    });
    println!("{payload}");
}

fn run(cli: &Cli) -> Result<()> {
    let ctx = AppContext::from_cli(cli)?;
    fillrank::cli::commands::run(&ctx, &cli.command)
}

fn init_tracing(cli: &Cli) {
    if cli.quiet {
        return;
    }

    let directive = match cli.verbose {
        0 => "warn,fillrank=info",
        1 => "info,fillrank=debug",
        2 => "debug,fillrank=trace",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));

    // Logs always go to stderr; stdout carries command output only.
    let (json, text) = if cli.robot {
        (Some(fmt::layer().json().with_writer(std::io::stderr)), None)
    } else {
        (None, Some(fmt::layer().with_writer(std::io::stderr)))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(json)
        .with(text)
        .init();
}
