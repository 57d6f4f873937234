//! Generative backend abstraction
//!
//! The orchestrator only needs two capabilities from a backend: a cheap
//! liveness probe for a model id and a real completion call. Everything
//! else (transport, auth, rate limiting) stays behind this seam.

use async_trait::async_trait;

use crate::error::BackendError;

#[cfg(test)]
pub mod mock;

pub mod gemini;

#[cfg(test)]
pub use mock::MockBackend;
pub use gemini::GeminiClient;

type Result<T> = std::result::Result<T, BackendError>;

/// A text-generation backend addressed by model identifier
#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    /// Minimal liveness call for a candidate model.
    ///
    /// Success means the model can be committed to for real generation.
    async fn probe(&self, model: &str) -> Result<()>;

    /// Run the real generation prompt against a model, returning raw text
    async fn complete(&self, model: &str, prompt: &str) -> Result<String>;
}
