//! Status command implementation

use colored::Colorize;

use crate::cli::{CommandContext, OutputFormat};
use crate::error::Result;
use crate::models::display::format_size;

/// Show configuration and storage status
pub fn run(ctx: &CommandContext) -> Result<()> {
    let cache = ctx.cache()?;
    let stats = cache.stats();
    let key_configured = ctx.config.require_api_key().is_ok();

    match ctx.format {
        OutputFormat::Json => {
            let json = serde_json::json!({
                "apiKeyConfigured": key_configured,
                "storageDir": ctx.storage_dir().display().to_string(),
                "cachedGames": stats.entries,
                "totalSizeBytes": stats.total_size_bytes,
                "models": ctx.config.models(),
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        OutputFormat::Table => {
            println!("{}", "GameForge Status".bold());
            println!("────────────────────────────────────────");
            println!(
                "API key:       {}",
                if key_configured {
                    "configured".green().to_string()
                } else {
                    "not configured (run `gameforge init`)".yellow().to_string()
                }
            );
            println!("Storage:       {}", ctx.storage_dir().display());
            println!("Cached games:  {}", stats.entries);
            println!("Total size:    {}", format_size(stats.total_size_bytes));
            println!(
                "Models:        {}",
                ctx.config.models().join(", ")
            );
        }
    }

    Ok(())
}
