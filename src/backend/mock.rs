//! Mock generative backend for testing
//!
//! Scripted probe/completion behavior plus call recording, so orchestrator
//! tests can assert on model selection without a network.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::GenerativeBackend;
use crate::error::BackendError;

type Result<T> = std::result::Result<T, BackendError>;

/// Mock backend for orchestrator tests.
///
/// Probes succeed only for models registered via `with_available`;
/// completions return the configured response or the configured error.
pub struct MockBackend {
    /// Models whose probe succeeds
    available: Vec<String>,
    /// Raw text returned from complete
    response: String,
    /// When set, complete fails with this message
    complete_error: Option<String>,
    /// Every probed model, in order
    probe_calls: Arc<Mutex<Vec<String>>>,
    /// Every (model, prompt) passed to complete
    complete_calls: Arc<Mutex<Vec<(String, String)>>>,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self {
            available: Vec::new(),
            response: "<!DOCTYPE html><html><body>mock</body></html>".to_string(),
            complete_error: None,
            probe_calls: Arc::new(Mutex::new(Vec::new())),
            complete_calls: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl MockBackend {
    /// Mock where every probe succeeds for the given models
    pub fn new(available: &[&str]) -> Self {
        Self {
            available: available.iter().map(|m| m.to_string()).collect(),
            ..Self::default()
        }
    }

    /// Set the raw text complete returns
    pub fn with_response(mut self, response: &str) -> Self {
        self.response = response.to_string();
        self
    }

    /// Make complete fail
    pub fn with_complete_error(mut self, message: &str) -> Self {
        self.complete_error = Some(message.to_string());
        self
    }

    /// Models probed so far, in call order
    pub async fn probe_calls(&self) -> Vec<String> {
        self.probe_calls.lock().await.clone()
    }

    /// (model, prompt) pairs passed to complete
    pub async fn complete_calls(&self) -> Vec<(String, String)> {
        self.complete_calls.lock().await.clone()
    }
}

#[async_trait]
impl GenerativeBackend for MockBackend {
    async fn probe(&self, model: &str) -> Result<()> {
        self.probe_calls.lock().await.push(model.to_string());
        if self.available.iter().any(|m| m == model) {
            Ok(())
        } else {
            Err(BackendError::Generation {
                model: model.to_string(),
                message: "not available".to_string(),
            })
        }
    }

    async fn complete(&self, model: &str, prompt: &str) -> Result<String> {
        self.complete_calls
            .lock()
            .await
            .push((model.to_string(), prompt.to_string()));

        match &self.complete_error {
            Some(message) => Err(BackendError::Generation {
                model: model.to_string(),
                message: message.clone(),
            }),
            None => Ok(self.response.clone()),
        }
    }
}
