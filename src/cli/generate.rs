//! Generate command implementation

use std::path::{Path, PathBuf};

use colored::Colorize;

use crate::cli::{CommandContext, OutputFormat};
use crate::error::Result;
use crate::models::{GameDesign, GenerationRequest, Quality};
use crate::models::display::format_size;

/// Run the generate command
pub async fn run(
    ctx: &CommandContext,
    id: String,
    design_path: &Path,
    force: bool,
    output: Option<PathBuf>,
) -> Result<()> {
    let contents = std::fs::read_to_string(design_path)?;
    let design: GameDesign = serde_json::from_str(&contents)?;

    let generator = ctx.generator()?;
    let request = GenerationRequest {
        id,
        design,
        force_regenerate: force,
    };

    let result = generator.generate(&request).await?;

    if let Some(path) = &output {
        std::fs::write(path, &result.html)?;
    }

    match ctx.format {
        OutputFormat::Json => {
            let json = serde_json::json!({
                "id": result.id,
                "producedBy": result.produced_by,
                "quality": result.quality,
                "stats": result.stats,
                "outputFile": output.as_ref().map(|p| p.display().to_string()),
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        OutputFormat::Table => {
            match result.quality {
                Quality::Cached => {
                    println!("{} {}", "✓".green(), "Served from cache".bold());
                }
                Quality::Fresh => {
                    println!("{} {}", "✓".green(), "Generated new game".bold());
                }
            }
            println!("  Game:  {}", result.id);
            println!("  Model: {}", result.produced_by);
            println!("  Size:  {}", format_size(result.stats.html_bytes as u64));
            if let Some(path) = &output {
                println!("  File:  {}", path.display());
            }
        }
    }

    Ok(())
}
