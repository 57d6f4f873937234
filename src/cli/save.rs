//! Save command implementation
//!
//! Accepts an artifact produced outside the generator, e.g. a hand-edited
//! or re-uploaded game, and tracks it like any generated one.

use std::path::Path;

use crate::cli::{CommandContext, OutputFormat};
use crate::error::Result;
use crate::models::display::format_size;
use crate::store::UNKNOWN;

/// Run the save command
pub fn run(ctx: &CommandContext, id: &str, file: &Path, name: Option<String>) -> Result<()> {
    let html = std::fs::read_to_string(file)?;

    let cache = ctx.cache()?;
    let entry = cache.save(id, &html, UNKNOWN, name.as_deref().unwrap_or(UNKNOWN))?;

    match ctx.format {
        OutputFormat::Json => {
            let json = serde_json::json!({
                "id": id,
                "sizeBytes": entry.size_bytes,
                "success": true,
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        OutputFormat::Table => {
            println!("Saved {} ({})", id, format_size(entry.size_bytes));
        }
    }

    Ok(())
}
