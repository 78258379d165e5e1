//! fillrank score - Raw fuzzy score for one candidate

use clap::{Args, ValueEnum};
use serde::Serialize;

use crate::app::AppContext;
use crate::cli::output::{HumanLayout, emit_human, emit_json};
use crate::config::ScoringBackend;
use crate::error::Result;
use crate::scoring::BackendKind;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum BackendChoice {
    /// Use the configured engine
    #[default]
    Auto,
    Native,
    Fallback,
}

#[derive(Args, Debug)]
pub struct ScoreArgs {
    pub query: String,

    pub candidate: String,

    #[arg(long, value_enum, default_value_t = BackendChoice::Auto)]
    pub backend: BackendChoice,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ScoreReport<'a> {
    query: &'a str,
    candidate: &'a str,
    score: f64,
    backend: BackendKind,
}

pub fn run(ctx: &AppContext, args: &ScoreArgs) -> Result<()> {
    let dedicated = match args.backend {
        BackendChoice::Auto => None,
        BackendChoice::Native => Some(ctx.engine_for(ScoringBackend::Native)),
        BackendChoice::Fallback => Some(ctx.engine_for(ScoringBackend::Fallback)),
    };
    let engine = dedicated.as_ref().unwrap_or_else(|| ctx.engine());

    let query = args.query.trim().to_lowercase();
    let report = ScoreReport {
        query: &args.query,
        candidate: &args.candidate,
        score: engine.score(&query, &args.candidate),
        backend: engine.backend(),
    };

    if ctx.robot_mode {
        return emit_json(&report, ctx.config.robot.format);
    }

    let mut layout = HumanLayout::new();
    layout
        .kv("score", &format!("{:.4}", report.score))
        .kv("backend", &report.backend.to_string());
    emit_human(layout);
    Ok(())
}
