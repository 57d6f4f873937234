//! Models command implementation

use crate::cli::{CommandContext, OutputFormat};
use crate::error::Result;
use crate::models::display::ModelDisplay;
use crate::output::{json::format_json, table::format_table};

/// Show the model fallback list, highest priority first
pub fn run(ctx: &CommandContext) -> Result<()> {
    let rows: Vec<ModelDisplay> = ctx
        .config
        .models()
        .into_iter()
        .enumerate()
        .map(|(i, model)| ModelDisplay {
            priority: i + 1,
            model,
        })
        .collect();

    match ctx.format {
        OutputFormat::Json => println!("{}", format_json(&rows)?),
        OutputFormat::Table => println!("{}", format_table(&rows)),
    }

    Ok(())
}
