//! Delete and clear command implementations

use dialoguer::{Confirm, theme::ColorfulTheme};

use crate::cli::{CommandContext, OutputFormat};
use crate::error::{Error, Result, StoreError};

/// Delete one cached game
pub fn delete(ctx: &CommandContext, id: &str) -> Result<()> {
    let cache = ctx.cache()?;

    if !cache.delete(id)? {
        return Err(Error::Store(StoreError::NotFound(id.to_string())));
    }

    match ctx.format {
        OutputFormat::Json => {
            let json = serde_json::json!({ "id": id, "deleted": true });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        OutputFormat::Table => println!("Deleted {}", id),
    }

    Ok(())
}

/// Delete every cached game, confirming first unless `--yes`
pub fn clear(ctx: &CommandContext, yes: bool) -> Result<()> {
    let cache = ctx.cache()?;
    let count = cache.stats().entries;

    if count > 0 && !yes {
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(format!("Delete all {} cached games?", count))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("Aborted.");
            return Ok(());
        }
    }

    let deleted = cache.clear()?;

    match ctx.format {
        OutputFormat::Json => {
            let json = serde_json::json!({ "deleted": deleted, "success": true });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        OutputFormat::Table => {
            if deleted > 0 {
                println!("Cleared {} cached games", deleted);
            } else {
                println!("Cache was already empty");
            }
        }
    }

    Ok(())
}
