//! Init command implementation

use colored::Colorize;
use dialoguer::{Password, theme::ColorfulTheme};

use crate::backend::{GeminiClient, GenerativeBackend};
use crate::cli::CommandContext;
use crate::config::Config;
use crate::error::Result;

/// Run the init command
pub async fn run(ctx: &CommandContext, config_path: Option<&str>) -> Result<()> {
    println!("{}", "Welcome to GameForge!".bold().green());
    println!("Let's set up your Google AI configuration.\n");

    let api_key: String = Password::with_theme(&ColorfulTheme::default())
        .with_prompt("Enter your Google AI API key")
        .interact()?;

    // Verify the key against the highest-priority model that answers.
    // A failed check is a warning, not a hard stop: offline setup is fine.
    println!("\n{}", "Checking the key against Gemini...".cyan());
    let client = GeminiClient::new(api_key.clone())?;
    let mut verified = None;
    for model in ctx.config.models() {
        if client.probe(&model).await.is_ok() {
            verified = Some(model);
            break;
        }
    }

    match &verified {
        Some(model) => println!("{} {} responded", "✓".green(), model.bold()),
        None => println!(
            "{} No model responded; saving the key anyway",
            "⚠".yellow()
        ),
    }

    let mut config = ctx.config.clone();
    config.api_key = Some(api_key);

    match config_path {
        Some(path) => config.save_to(path.into())?,
        None => config.save()?,
    }

    let saved_to = match config_path {
        Some(path) => path.to_string(),
        None => Config::default_path()?.display().to_string(),
    };
    println!("\n{} Configuration saved to: {}", "✓".green(), saved_to);

    println!("\n{}", "You're all set! Try running:".bold());
    println!(
        "  {} - Generate a game from a design document",
        "gameforge generate <ID> --design design.json".cyan()
    );
    println!("  {} - List cached games", "gameforge list".cyan());

    Ok(())
}
