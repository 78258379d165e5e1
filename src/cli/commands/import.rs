//! fillrank import - Deduplicate an exported library

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use crate::app::AppContext;
use crate::cli::output::{HumanLayout, emit_human, emit_json};
use crate::error::Result;
use crate::library::Library;

#[derive(Args, Debug)]
pub struct ImportArgs {
    /// Exported library JSON
    pub file: PathBuf,

    /// Merge into the active library instead of importing on its own
    #[arg(long)]
    pub merge: bool,

    /// Write the result here instead of printing it
    #[arg(long, value_name = "PATH")]
    pub out: Option<PathBuf>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ImportReport {
    source: String,
    incoming_items: usize,
    kept_items: usize,
    duplicates_dropped: usize,
    merged: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    written_to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    library: Option<Library>,
}

pub fn run(ctx: &AppContext, args: &ImportArgs) -> Result<()> {
    let incoming = Library::load(&args.file)?;
    incoming.validate()?;
    let incoming_items = incoming.items.len();

    let library = if args.merge {
        let mut current = ctx.library.clone();
        current.merge_import(incoming);
        current
    } else {
        incoming.prepare_import()
    };

    let kept_items = library.items.len();
    let considered = if args.merge {
        incoming_items + ctx.library.items.len()
    } else {
        incoming_items
    };

    if let Some(out) = &args.out {
        library.save(out)?;
    }

    let report = ImportReport {
        source: args.file.display().to_string(),
        incoming_items,
        kept_items,
        duplicates_dropped: considered - kept_items,
        merged: args.merge,
        written_to: args.out.as_ref().map(|path| path.display().to_string()),
        library: args.out.is_none().then_some(library),
    };

    if ctx.robot_mode {
        return emit_json(&report, ctx.config.robot.format);
    }

    if let Some(library) = &report.library {
        return emit_json(library, ctx.config.robot.format);
    }

    let mut layout = HumanLayout::new();
    layout
        .kv("source", &report.source)
        .kv("incoming items", &report.incoming_items.to_string())
        .kv("kept items", &report.kept_items.to_string())
        .kv("duplicates", &report.duplicates_dropped.to_string());
    if let Some(path) = &report.written_to {
        layout.kv("written to", path);
    }
    emit_human(layout);
    Ok(())
}
