//! Google Gemini API client

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use reqwest::{Client as HttpClient, StatusCode};
use serde::{Deserialize, Serialize};

use super::GenerativeBackend;
use crate::error::BackendError;

type Result<T> = std::result::Result<T, BackendError>;

/// Gemini generateContent API base URL
const API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Client-side throttle to stay clear of free-tier quotas
const RATE_LIMIT_PER_SECOND: u32 = 2;

/// Prompt used for model liveness probes
const PROBE_PROMPT: &str = "test";

/// Google Gemini API client
pub struct GeminiClient {
    http: HttpClient,
    base_url: String,
    api_key: String,
    rate_limiter: Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

impl GeminiClient {
    /// Create a client against the production API
    pub fn new(api_key: String) -> Result<Self> {
        Self::with_base_url(api_key, API_BASE_URL.to_string())
    }

    /// Create a client against a specific API host (used by HTTP tests)
    pub fn with_base_url(api_key: String, base_url: String) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(300))
            .build()
            .map_err(|e| BackendError::Network(e.to_string()))?;

        let quota = Quota::per_second(std::num::NonZeroU32::new(RATE_LIMIT_PER_SECOND).unwrap());
        let rate_limiter = Arc::new(RateLimiter::direct(quota));

        Ok(Self {
            http,
            base_url,
            api_key,
            rate_limiter,
        })
    }

    async fn generate_content(&self, model: &str, prompt: &str) -> Result<String> {
        self.rate_limiter.until_ready().await;

        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, model, self.api_key
        );
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(BackendError::from)?;

        let status = response.status();
        match status {
            StatusCode::OK => {
                let data = response
                    .json::<GenerateContentResponse>()
                    .await
                    .map_err(|e| {
                        BackendError::InvalidResponse(format!("Failed to parse response: {}", e))
                    })?;
                Self::first_candidate_text(data)
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(BackendError::Unauthorized),
            _ => {
                let message = response
                    .text()
                    .await
                    .unwrap_or_else(|_| format!("HTTP {}", status));
                Err(BackendError::Generation {
                    model: model.to_string(),
                    message,
                })
            }
        }
    }

    fn first_candidate_text(data: GenerateContentResponse) -> Result<String> {
        let candidate = data
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| BackendError::InvalidResponse("No candidates returned".to_string()))?;

        let content = candidate
            .content
            .ok_or_else(|| BackendError::InvalidResponse("Candidate has no content".to_string()))?;

        let text: String = content
            .parts
            .into_iter()
            .map(|part| part.text)
            .collect();

        if text.is_empty() {
            return Err(BackendError::InvalidResponse(
                "Candidate contained no text".to_string(),
            ));
        }
        Ok(text)
    }
}

#[async_trait]
impl GenerativeBackend for GeminiClient {
    async fn probe(&self, model: &str) -> Result<()> {
        self.generate_content(model, PROBE_PROMPT).await.map(|_| ())
    }

    async fn complete(&self, model: &str, prompt: &str) -> Result<String> {
        self.generate_content(model, prompt).await
    }
}
