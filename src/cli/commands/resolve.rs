//! fillrank resolve - Show the resolved policy for a host

use clap::Args;
use serde::Serialize;

use crate::app::AppContext;
use crate::cli::output::{HumanLayout, emit_human, emit_json, join_or_dash};
use crate::error::Result;
use crate::model::ResolvedPolicy;
use crate::rules::{RuleMatch, matched_rules, normalize_host, resolve};

#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Host name of the page, e.g. www.linkedin.com
    pub host: String,

    /// Also list every matching rule in processing order
    #[arg(long)]
    pub explain: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ResolveReport {
    host: String,
    policy: ResolvedPolicy,
    #[serde(skip_serializing_if = "Option::is_none")]
    matches: Option<Vec<RuleMatch>>,
}

pub fn run(ctx: &AppContext, args: &ResolveArgs) -> Result<()> {
    let rules = &ctx.library.domain_rules;
    let report = ResolveReport {
        host: normalize_host(&args.host),
        policy: resolve(&args.host, rules),
        matches: args.explain.then(|| matched_rules(&args.host, rules)),
    };

    if ctx.robot_mode {
        return emit_json(&report, ctx.config.robot.format);
    }

    let policy = &report.policy;
    let mut layout = HumanLayout::new();
    layout
        .title(&format!("Policy for {}", report.host))
        .kv("disabled", if policy.disable { "yes" } else { "no" })
        .kv("include", &join_or_dash(&policy.include_folders))
        .kv("exclude", &join_or_dash(&policy.exclude_folders))
        .kv("boost tags", &join_or_dash(&policy.boost_tags));

    if let Some(matches) = &report.matches {
        layout.blank().section("Matched rules");
        if matches.is_empty() {
            layout.push_line("(none)");
        }
        for entry in matches {
            let disable = if entry.disable_on_host { ", disables" } else { "" };
            layout.bullet(&format!(
                "{} [{}] specificity {}{disable}",
                entry.pattern, entry.rule_id, entry.specificity
            ));
        }
    }

    emit_human(layout);
    Ok(())
}
