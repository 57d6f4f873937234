//! Error types for the GameForge CLI

use thiserror::Error;

/// Result type alias for GameForge operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the application
#[derive(Debug, Error)]
#[allow(dead_code)]
pub enum Error {
    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Interactive prompt error: {0}")]
    Dialoguer(String),

    #[error("Operation failed: {0}")]
    Other(String),
}

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        Error::Dialoguer(err.to_string())
    }
}

/// Generative backend errors
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("API key rejected by the backend. Run `gameforge init` to update it.")]
    Unauthorized,

    #[error("No working model found. Every candidate in the fallback list failed its probe.")]
    NoAvailableModel,

    #[error("Generation failed on model '{model}': {message}")]
    Generation { model: String, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid backend response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            BackendError::Network("Request timed out".to_string())
        } else if err.is_connect() {
            BackendError::Network("Failed to connect to backend".to_string())
        } else {
            BackendError::Network(err.to_string())
        }
    }
}

/// Artifact storage errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("No cached game found for id '{0}'")]
    NotFound(String),

    #[error("Storage I/O error: {0}")]
    Io(String),
}

/// Raised when backend output contains no usable HTML document
#[derive(Debug, Error)]
#[error("Invalid HTML structure: {0}")]
pub struct ExtractError(pub &'static str);

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),

    #[error("API key not configured. Run `gameforge init` to set up your API key.")]
    MissingApiKey,
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_error_unauthorized_message() {
        let err = BackendError::Unauthorized;
        assert!(err.to_string().contains("gameforge init"));
    }

    #[test]
    fn test_backend_error_no_available_model() {
        let err = BackendError::NoAvailableModel;
        assert!(err.to_string().contains("probe"));
    }

    #[test]
    fn test_backend_error_generation() {
        let err = BackendError::Generation {
            model: "gemini-2.5-pro".to_string(),
            message: "quota exceeded".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("gemini-2.5-pro"));
        assert!(msg.contains("quota exceeded"));
    }

    #[test]
    fn test_store_error_not_found() {
        let err = StoreError::NotFound("g-42".to_string());
        assert!(err.to_string().contains("g-42"));
    }

    #[test]
    fn test_extract_error_message() {
        let err = ExtractError("missing closing </html> tag");
        assert!(err.to_string().contains("Invalid HTML structure"));
        assert!(err.to_string().contains("</html>"));
    }

    #[test]
    fn test_config_error_missing_api_key() {
        let err = ConfigError::MissingApiKey;
        assert!(err.to_string().contains("gameforge init"));
    }

    #[test]
    fn test_error_from_backend_error() {
        let err: Error = BackendError::NoAvailableModel.into();
        match err {
            Error::Backend(BackendError::NoAvailableModel) => (),
            _ => panic!("Expected Error::Backend(BackendError::NoAvailableModel)"),
        }
    }

    #[test]
    fn test_error_from_store_error() {
        let err: Error = StoreError::NotFound("x".to_string()).into();
        match err {
            Error::Store(StoreError::NotFound(_)) => (),
            _ => panic!("Expected Error::Store(StoreError::NotFound)"),
        }
    }

    #[test]
    fn test_config_error_from_yaml_error() {
        let yaml_str = "invalid: [yaml: content";
        let yaml_err = serde_yaml::from_str::<serde_yaml::Value>(yaml_str).unwrap_err();
        let config_err: ConfigError = yaml_err.into();

        match config_err {
            ConfigError::ParseError(_) => (),
            _ => panic!("Expected ConfigError::ParseError"),
        }
    }
}
