//! fillrank rank - Ranked suggestions for a host and query

use clap::Args;
use serde::Serialize;

use crate::app::AppContext;
use crate::cli::output::{HumanLayout, emit_human, emit_json};
use crate::error::Result;
use crate::model::RankedSuggestion;
use crate::ranking::rank;
use crate::rules::{normalize_host, resolve};
use crate::scoring::BackendKind;

#[derive(Args, Debug)]
pub struct RankArgs {
    /// Host name of the page
    pub host: String,

    /// Text typed so far; omit to rank by recency
    #[arg(default_value = "")]
    pub query: String,

    /// Maximum number of suggestions (defaults to the library setting)
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RankReport<'a> {
    host: String,
    query: &'a str,
    disabled: bool,
    backend: BackendKind,
    limit: usize,
    suggestions: Vec<RankedSuggestion>,
}

pub fn run(ctx: &AppContext, args: &RankArgs) -> Result<()> {
    let policy = resolve(&args.host, &ctx.library.domain_rules);
    let limit = ctx.suggestion_limit(args.limit);
    let options = ctx.config.rank_options(limit);
    let suggestions = rank(ctx.engine(), &args.query, &ctx.library.items, &policy, &options);

    let report = RankReport {
        host: normalize_host(&args.host),
        query: &args.query,
        disabled: policy.disable,
        backend: ctx.engine().backend(),
        limit,
        suggestions,
    };

    if ctx.robot_mode {
        return emit_json(&report, ctx.config.robot.format);
    }

    let mut layout = HumanLayout::new();
    layout.title(&format!("Suggestions for {}", report.host));
    if report.disabled {
        layout.push_line("Suggestions are disabled on this host.");
    } else if report.suggestions.is_empty() {
        layout.push_line("No matching items.");
    }
    for (position, suggestion) in report.suggestions.iter().enumerate() {
        layout.push_line(format!(
            "{:>2}. {:.3}  {}  [{}]",
            position + 1,
            suggestion.score,
            suggestion.highlighted_label,
            suggestion.item.folder
        ));
    }
    emit_human(layout);
    Ok(())
}
