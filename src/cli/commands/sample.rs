//! fillrank sample - Print the sample library

use chrono::Utc;
use clap::Args;

use crate::app::AppContext;
use crate::cli::output::{HumanLayout, emit_human, emit_json};
use crate::error::Result;
use crate::library::Library;

#[derive(Args, Debug)]
pub struct SampleArgs {
    /// Print the raw JSON snapshot even outside robot mode
    #[arg(long)]
    pub json: bool,
}

pub fn run(ctx: &AppContext, args: &SampleArgs) -> Result<()> {
    let library = Library::sample(Utc::now());

    if ctx.robot_mode || args.json {
        return emit_json(&library, ctx.config.robot.format);
    }

    let mut layout = HumanLayout::new();
    layout.section("Items");
    for item in &library.items {
        layout.bullet(&format!("{} [{}/{}]", item.label, item.profile, item.folder));
    }
    layout.blank().section("Domain rules");
    for rule in &library.domain_rules {
        layout.bullet(&rule.pattern);
    }
    emit_human(layout);
    Ok(())
}
