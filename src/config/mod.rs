//! Configuration management for GameForge

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{ConfigError, Result};

/// Model fallback list tried in priority order when none is configured
pub const DEFAULT_MODELS: &[&str] = &[
    "gemini-2.5-pro",
    "gemini-2.5-flash",
    "gemini-1.5-pro-latest",
    "gemini-1.5-flash-latest",
    "gemini-pro",
];

/// Environment variable consulted when the config file has no API key
pub const API_KEY_ENV: &str = "GOOGLE_AI_API_KEY";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Google AI API key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Storage directory override for cached games
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_dir: Option<PathBuf>,

    /// Model priority list override
    #[serde(skip_serializing_if = "Option::is_none")]
    pub models: Option<Vec<String>>,

    /// User preferences
    #[serde(default)]
    pub preferences: Preferences,
}

/// User preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preferences {
    /// Default output format
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    /// Per-candidate probe time budget
    #[serde(default = "default_probe_timeout_secs")]
    pub probe_timeout_secs: u64,

    /// Generation call time budget
    #[serde(default = "default_generate_timeout_secs")]
    pub generate_timeout_secs: u64,
}

fn default_probe_timeout_secs() -> u64 {
    15
}

fn default_generate_timeout_secs() -> u64 {
    300
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            format: None,
            probe_timeout_secs: default_probe_timeout_secs(),
            generate_timeout_secs: default_generate_timeout_secs(),
        }
    }
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".gameforge").join("config.yaml"))
    }

    /// Load configuration, falling back to defaults when no file exists.
    ///
    /// Most commands work without configuration; only generation needs the
    /// API key, and that is enforced at the point of use.
    pub fn load_or_default(path: Option<&str>) -> Result<Self> {
        let path = match path {
            Some(p) => PathBuf::from(p),
            None => Self::default_path()?,
        };

        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&path)?;
        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;

        Ok(config)
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        self.save_to(Self::default_path()?)
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = serde_yaml::to_string(self)
            .map_err(|e| ConfigError::SaveError(e.to_string()))?;

        std::fs::write(&path, contents)?;

        // The file holds an API key
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(&path)?.permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(&path, perms)?;
        }

        Ok(())
    }

    /// API key from config or environment, required for generation
    pub fn require_api_key(&self) -> Result<String> {
        if let Some(key) = &self.api_key {
            return Ok(key.clone());
        }
        std::env::var(API_KEY_ENV)
            .ok()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| ConfigError::MissingApiKey.into())
    }

    /// Storage directory for cached games
    pub fn storage_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.storage_dir {
            return Ok(dir.clone());
        }
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;
        Ok(home.join(".gameforge").join("generated-games"))
    }

    /// Model priority list, configured or default
    pub fn models(&self) -> Vec<String> {
        match &self.models {
            Some(models) if !models.is_empty() => models.clone(),
            _ => DEFAULT_MODELS.iter().map(|m| m.to_string()).collect(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            storage_dir: None,
            models: None,
            preferences: Preferences::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.api_key.is_none());
        assert!(config.storage_dir.is_none());
        assert_eq!(config.preferences.probe_timeout_secs, 15);
        assert_eq!(config.preferences.generate_timeout_secs, 300);
    }

    #[test]
    fn test_default_models_order() {
        let config = Config::default();
        let models = config.models();
        assert_eq!(models.first().map(String::as_str), Some("gemini-2.5-pro"));
        assert_eq!(models.last().map(String::as_str), Some("gemini-pro"));
    }

    #[test]
    fn test_models_override() {
        let config = Config {
            models: Some(vec!["custom-model".to_string()]),
            ..Config::default()
        };
        assert_eq!(config.models(), vec!["custom-model".to_string()]);
    }

    #[test]
    fn test_empty_models_override_falls_back() {
        let config = Config {
            models: Some(vec![]),
            ..Config::default()
        };
        assert_eq!(config.models().len(), DEFAULT_MODELS.len());
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");

        let config = Config {
            api_key: Some("secret".to_string()),
            storage_dir: Some(PathBuf::from("/tmp/games")),
            models: Some(vec!["gemini-pro".to_string()]),
            preferences: Preferences::default(),
        };
        config.save_to(path.clone()).unwrap();

        let loaded = Config::load_or_default(Some(path.to_str().unwrap())).unwrap();
        assert_eq!(loaded.api_key.as_deref(), Some("secret"));
        assert_eq!(loaded.models, Some(vec!["gemini-pro".to_string()]));
    }

    #[test]
    fn test_load_missing_file_is_default() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope.yaml");
        let config = Config::load_or_default(Some(path.to_str().unwrap())).unwrap();
        assert!(config.api_key.is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_saved_config_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        Config::default().save_to(path.clone()).unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
