//! Export command implementation

use std::io::Write;
use std::path::PathBuf;

use crate::cli::CommandContext;
use crate::error::Result;

/// Run the export command
pub fn run(ctx: &CommandContext, id: &str, output: Option<PathBuf>) -> Result<()> {
    let cache = ctx.cache()?;
    let bytes = cache.load(id)?;

    match output {
        Some(path) => {
            std::fs::write(&path, &bytes)?;
            println!("Wrote {} ({} bytes)", path.display(), bytes.len());
        }
        None => {
            std::io::stdout().write_all(&bytes)?;
        }
    }

    Ok(())
}
