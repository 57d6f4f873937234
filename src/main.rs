//! GameForge CLI - generate and cache AI-built HTML games

use clap::Parser;

mod backend;
mod cli;
mod config;
mod error;
mod extract;
mod generate;
mod models;
mod output;
mod store;

use cli::{Cli, CommandContext, Commands};
use error::Result;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if cli.debug { "debug" } else { "warn" }),
    )
    .init();

    let ctx = CommandContext::from_cli(&cli)?;

    match cli.command {
        Commands::Init => cli::init::run(&ctx, cli.config.as_deref()).await,
        Commands::Status => cli::status::run(&ctx),
        Commands::Generate {
            id,
            design,
            force,
            output,
        } => cli::generate::run(&ctx, id, &design, force, output).await,
        Commands::Save { id, file, name } => cli::save::run(&ctx, &id, &file, name),
        Commands::Export { id, output } => cli::export::run(&ctx, &id, output),
        Commands::List => cli::list::run(&ctx),
        Commands::Delete { id } => cli::delete::delete(&ctx, &id),
        Commands::Clear { yes } => cli::delete::clear(&ctx, yes),
        Commands::Models => cli::models::run(&ctx),
        Commands::Completions { shell } => cli::completions::run(shell),
    }
}
