//! Shared command execution context

use std::path::PathBuf;
use std::time::Duration;

use crate::backend::GeminiClient;
use crate::cli::{Cli, OutputFormat};
use crate::config::Config;
use crate::error::Result;
use crate::generate::Generator;
use crate::store::GameCache;

/// Resolved configuration and storage handles for one command invocation.
///
/// The cache opens without credentials; a generator additionally needs the
/// API key and is only built for commands that actually generate.
pub struct CommandContext {
    pub config: Config,
    pub format: OutputFormat,
    storage_dir: PathBuf,
}

impl CommandContext {
    /// Resolve context from global CLI options
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let config = Config::load_or_default(cli.config.as_deref())?;

        let storage_dir = match &cli.storage_dir {
            Some(dir) => dir.clone(),
            None => config.storage_dir()?,
        };

        let format = cli
            .format
            .or_else(|| match config.preferences.format.as_deref() {
                Some("json") => Some(OutputFormat::Json),
                Some("table") => Some(OutputFormat::Table),
                _ => None,
            })
            .unwrap_or(OutputFormat::Table);

        Ok(Self {
            config,
            format,
            storage_dir,
        })
    }

    /// Storage directory in effect for this invocation
    pub fn storage_dir(&self) -> &PathBuf {
        &self.storage_dir
    }

    /// Open the game cache
    pub fn cache(&self) -> Result<GameCache> {
        Ok(GameCache::open(&self.storage_dir)?)
    }

    /// Build a generator over the real Gemini backend.
    ///
    /// Fails with the missing-key error when no credential is configured;
    /// cache-only commands never call this.
    pub fn generator(&self) -> Result<Generator<GeminiClient>> {
        let api_key = self.config.require_api_key()?;
        let cache = self.cache()?;

        let generator = Generator::gemini(api_key, cache, self.config.models())?.with_timeouts(
            Duration::from_secs(self.config.preferences.probe_timeout_secs),
            Duration::from_secs(self.config.preferences.generate_timeout_secs),
        );
        Ok(generator)
    }
}
