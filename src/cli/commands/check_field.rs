//! fillrank check-field - Field eligibility heuristics

use clap::Args;
use serde::Serialize;

use crate::app::AppContext;
use crate::cli::output::{HumanLayout, emit_human, emit_json};
use crate::error::Result;
use crate::fields::{ElementKind, FieldDescriptor, Refusal, refusal};

#[derive(Args, Debug)]
pub struct CheckFieldArgs {
    #[arg(long, value_enum, default_value_t = ElementKind::Input)]
    pub element: ElementKind,

    /// Input `type` attribute
    #[arg(long = "type", value_name = "TYPE")]
    pub input_type: Option<String>,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub id: Option<String>,

    #[arg(long)]
    pub aria_label: Option<String>,

    #[arg(long)]
    pub autocomplete: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FieldReport {
    fillable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    refusal: Option<Refusal>,
}

pub fn run(ctx: &AppContext, args: &CheckFieldArgs) -> Result<()> {
    let field = FieldDescriptor {
        element: args.element,
        input_type: args.input_type.clone(),
        name: args.name.clone(),
        id: args.id.clone(),
        aria_label: args.aria_label.clone(),
        autocomplete: args.autocomplete.clone(),
    };
    let refused = refusal(&field);
    let report = FieldReport {
        fillable: refused.is_none(),
        refusal: refused,
    };

    if ctx.robot_mode {
        return emit_json(&report, ctx.config.robot.format);
    }

    let mut layout = HumanLayout::new();
    layout.kv("fillable", if report.fillable { "yes" } else { "no" });
    if let Some(reason) = report.refusal {
        let reason = match reason {
            Refusal::NotEditable => "element is not an input or textarea",
            Refusal::InputType => "input type never receives suggestions",
            Refusal::SensitiveName => "name, id or label looks sensitive",
            Refusal::Autocomplete => "autocomplete attribute blocks filling",
        };
        layout.kv("reason", reason);
    }
    emit_human(layout);
    Ok(())
}
