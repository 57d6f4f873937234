//! List command implementation

use crate::cli::{CommandContext, OutputFormat};
use crate::error::Result;
use crate::models::display::EntryDisplay;
use crate::output::{json::format_json, table::format_table};

/// Run the list command
pub fn run(ctx: &CommandContext) -> Result<()> {
    let cache = ctx.cache()?;

    let mut entries = cache.entries();
    entries.sort_by(|(_, a), (_, b)| b.created_at.cmp(&a.created_at));

    let rows: Vec<EntryDisplay> = entries
        .iter()
        .map(|(id, entry)| EntryDisplay::from_entry(id, entry))
        .collect();

    match ctx.format {
        OutputFormat::Json => println!("{}", format_json(&rows)?),
        OutputFormat::Table => println!("{}", format_table(&rows)),
    }

    Ok(())
}
