//! CLI command definitions and handlers

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

pub use clap_complete::Shell;

pub mod completions;
pub mod context;
pub mod delete;
pub mod export;
pub mod generate;
pub mod init;
pub mod list;
pub mod models;
pub mod save;
pub mod status;

pub use context::CommandContext;

/// GameForge CLI - generate and cache AI-built HTML games
#[derive(Parser, Debug)]
#[command(name = "gameforge")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (table, json)
    #[arg(long, global = true, env = "GAMEFORGE_FORMAT", hide_env = true)]
    pub format: Option<OutputFormat>,

    /// Override config file location
    #[arg(long, global = true, env = "GAMEFORGE_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Override the game storage directory
    #[arg(long, global = true, env = "GAMEFORGE_STORAGE_DIR", hide_env = true)]
    pub storage_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true, env = "GAMEFORGE_DEBUG", hide_env = true)]
    pub debug: bool,
}

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    Table,
    /// Pretty-printed JSON
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Set up your Google AI API key
    Init,

    /// Show configuration and storage status
    Status,

    /// Generate a game (served from cache when already built)
    Generate {
        /// Game id to generate
        id: String,

        /// Path to the game design JSON document
        #[arg(long)]
        design: PathBuf,

        /// Regenerate even if a cached artifact exists
        #[arg(long)]
        force: bool,

        /// Also write the HTML artifact to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Save an externally produced game artifact into the cache
    Save {
        /// Game id to save under
        id: String,

        /// Path to the HTML file
        file: PathBuf,

        /// Human-readable game name
        #[arg(long)]
        name: Option<String>,
    },

    /// Export a cached game artifact
    Export {
        /// Game id to export
        id: String,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List cached games
    List,

    /// Delete one cached game
    Delete {
        /// Game id to delete
        id: String,
    },

    /// Delete every cached game
    Clear {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },

    /// Show the model fallback list
    Models,

    /// Generate shell completions
    Completions {
        /// Target shell
        shell: Shell,
    },
}
