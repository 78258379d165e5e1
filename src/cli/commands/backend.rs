//! fillrank backend - Report the selected scoring backend

use clap::Args;
use serde::Serialize;

use crate::app::AppContext;
use crate::cli::output::{HumanLayout, emit_human, emit_json};
use crate::config::ScoringBackend;
use crate::error::Result;
use crate::scoring::BackendKind;

#[derive(Args, Debug)]
pub struct BackendArgs {}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BackendReport {
    configured: ScoringBackend,
    selected: BackendKind,
    downgrades: usize,
    memory_limit_bytes: usize,
}

pub fn run(ctx: &AppContext, _args: &BackendArgs) -> Result<()> {
    let engine = ctx.engine();
    let report = BackendReport {
        configured: ctx.config.scoring.backend,
        selected: engine.backend(),
        downgrades: engine.downgrades(),
        memory_limit_bytes: ctx.config.scoring.memory_limit_bytes,
    };

    if ctx.robot_mode {
        return emit_json(&report, ctx.config.robot.format);
    }

    let configured = match report.configured {
        ScoringBackend::Native => "native",
        ScoringBackend::Fallback => "fallback",
    };
    let mut layout = HumanLayout::new();
    layout
        .kv("configured", configured)
        .kv("selected", &report.selected.to_string())
        .kv("downgrades", &report.downgrades.to_string());
    emit_human(layout);
    Ok(())
}
