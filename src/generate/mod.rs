//! Generation orchestrator
//!
//! Drives one request through `check cache -> probe models -> generate ->
//! extract -> persist`. The cache hit path never touches the backend; the
//! miss path commits to the first model whose probe succeeds and does not
//! fall back further once committed.

pub mod prompt;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::timeout;

use crate::backend::GenerativeBackend;
use crate::error::{BackendError, Error, Result};
use crate::extract::extract_html;
use crate::models::{GenerationRequest, GenerationResult, GenerationStats, Quality};
use crate::store::{GameCache, UNKNOWN};
use prompt::build_prompt;

/// Per-attempt time budget for a model liveness probe
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(15);

/// Time budget for the real generation call
pub const DEFAULT_GENERATE_TIMEOUT: Duration = Duration::from_secs(300);

/// Orchestrates cached game generation against a backend
pub struct Generator<B: GenerativeBackend> {
    backend: B,
    cache: GameCache,
    models: Vec<String>,
    probe_timeout: Duration,
    generate_timeout: Duration,
    /// One lock per game id so concurrent requests for the same id cannot
    /// double-generate; the loser of the race is served from cache.
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl<B: GenerativeBackend> Generator<B> {
    /// Build a generator over a cache and a prioritized model list
    pub fn new(backend: B, cache: GameCache, models: Vec<String>) -> Self {
        Self {
            backend,
            cache,
            models,
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            generate_timeout: DEFAULT_GENERATE_TIMEOUT,
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Override probe/generation time budgets
    pub fn with_timeouts(mut self, probe: Duration, generate: Duration) -> Self {
        self.probe_timeout = probe;
        self.generate_timeout = generate;
        self
    }

    /// The cache this generator writes through
    pub fn cache(&self) -> &GameCache {
        &self.cache
    }

    /// Generate (or serve from cache) the artifact for one request
    pub async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResult> {
        let id_lock = self.id_lock(&request.id).await;
        let _guard = id_lock.lock().await;

        if !request.force_regenerate
            && let Some((bytes, entry)) = self.cache.lookup(&request.id)?
        {
            log::info!("Returning cached game: {}", request.id);
            let html = String::from_utf8_lossy(&bytes).into_owned();
            return Ok(self.result(request, html, entry.produced_by, Quality::Cached));
        }

        log::info!("Generating NEW game: {}", request.id);

        let model = self.probe_models().await?;
        let prompt = build_prompt(&request.design);

        let raw = match timeout(self.generate_timeout, self.backend.complete(&model, &prompt)).await
        {
            Ok(result) => result.map_err(Error::Backend)?,
            Err(_) => {
                return Err(BackendError::Generation {
                    model,
                    message: format!(
                        "timed out after {}s",
                        self.generate_timeout.as_secs()
                    ),
                }
                .into());
            }
        };

        let html = extract_html(&raw)?;
        log::info!(
            "Generated with {} ({:.1} KB)",
            model,
            html.len() as f64 / 1024.0
        );

        self.cache
            .save(&request.id, &html, &model, request.design.project_name())?;

        Ok(self.result(request, html, model, Quality::Fresh))
    }

    /// Track an artifact produced outside the orchestrator
    pub fn save_external(&self, id: &str, html: &str, label: Option<&str>) -> Result<()> {
        self.cache
            .save(id, html, UNKNOWN, label.unwrap_or(UNKNOWN))?;
        Ok(())
    }

    /// Load a cached artifact or fail with `NotFound`
    pub fn load(&self, id: &str) -> Result<Vec<u8>> {
        Ok(self.cache.load(id)?)
    }

    /// Walk the model priority list and commit to the first live candidate.
    ///
    /// Order is the tie-break: once a probe succeeds, later candidates are
    /// never tried. Each probe is bounded by the probe timeout.
    async fn probe_models(&self) -> Result<String> {
        for model in &self.models {
            log::debug!("Trying {}...", model);
            match timeout(self.probe_timeout, self.backend.probe(model)).await {
                Ok(Ok(())) => {
                    log::info!("Using {}", model);
                    return Ok(model.clone());
                }
                Ok(Err(e)) => log::debug!("{} not available: {}", model, e),
                Err(_) => log::debug!("{} probe timed out", model),
            }
        }
        Err(BackendError::NoAvailableModel.into())
    }

    fn result(
        &self,
        request: &GenerationRequest,
        html: String,
        produced_by: String,
        quality: Quality,
    ) -> GenerationResult {
        let stats = GenerationStats {
            html_bytes: html.len(),
            factions: request.design.game_design_spec.factions.len(),
            units: request.design.balancing.units.len(),
        };
        GenerationResult {
            id: request.id.clone(),
            html,
            produced_by,
            quality,
            stats,
        }
    }

    async fn id_lock(&self, id: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().await;
        locks
            .entry(id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}

impl Generator<crate::backend::GeminiClient> {
    /// Convenience constructor for the real Gemini backend
    pub fn gemini(api_key: String, cache: GameCache, models: Vec<String>) -> Result<Self> {
        let client = crate::backend::GeminiClient::new(api_key)?;
        Ok(Self::new(client, cache, models))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MockBackend;
    use crate::models::{Faction, GameDesign, UnitDef};
    use tempfile::TempDir;

    const MODELS: &[&str] = &["model-a", "model-b", "model-c"];

    fn request(id: &str) -> GenerationRequest {
        let mut design = GameDesign::default();
        design.metadata.project_name = Some("Test Game".to_string());
        design.game_design_spec.factions = vec![Faction {
            name: "Terrans".to_string(),
        }];
        design.balancing.units = vec![
            UnitDef {
                unit_name: "Marine".to_string(),
            },
            UnitDef {
                unit_name: "Tank".to_string(),
            },
        ];
        GenerationRequest {
            id: id.to_string(),
            design,
            force_regenerate: false,
        }
    }

    fn generator(backend: MockBackend, dir: &TempDir) -> Generator<MockBackend> {
        let cache = GameCache::open(dir.path()).unwrap();
        Generator::new(
            backend,
            cache,
            MODELS.iter().map(|m| m.to_string()).collect(),
        )
    }

    #[tokio::test]
    async fn test_generate_fresh_writes_through() {
        let dir = TempDir::new().unwrap();
        let generator = generator(MockBackend::new(&["model-a"]), &dir);

        let result = generator.generate(&request("g-1")).await.unwrap();

        assert_eq!(result.quality, Quality::Fresh);
        assert_eq!(result.produced_by, "model-a");
        assert_eq!(result.stats.factions, 1);
        assert_eq!(result.stats.units, 2);

        let entry = generator.cache().entry("g-1").unwrap();
        assert_eq!(entry.produced_by, "model-a");
        assert_eq!(entry.label, "Test Game");
        assert_eq!(
            generator.cache().load("g-1").unwrap(),
            result.html.as_bytes()
        );
    }

    #[tokio::test]
    async fn test_probe_tie_break_prefers_priority_order() {
        let dir = TempDir::new().unwrap();
        // model-a fails its probe, b and c would both succeed
        let generator = generator(MockBackend::new(&["model-b", "model-c"]), &dir);

        let result = generator.generate(&request("g-1")).await.unwrap();
        assert_eq!(result.produced_by, "model-b");

        // c was never probed: the loop stops at the first success
        let probes = generator.backend.probe_calls().await;
        assert_eq!(probes, vec!["model-a", "model-b"]);
    }

    #[tokio::test]
    async fn test_exhausted_probes_is_no_available_model() {
        let dir = TempDir::new().unwrap();
        let generator = generator(MockBackend::new(&[]), &dir);

        match generator.generate(&request("g-1")).await {
            Err(Error::Backend(BackendError::NoAvailableModel)) => (),
            other => panic!("Expected NoAvailableModel, got {:?}", other.map(|_| ())),
        }
        assert_eq!(generator.backend.probe_calls().await.len(), MODELS.len());
    }

    #[tokio::test]
    async fn test_second_request_served_from_cache() {
        let dir = TempDir::new().unwrap();
        let generator = generator(MockBackend::new(&["model-a"]), &dir);

        let first = generator.generate(&request("g-1")).await.unwrap();
        let second = generator.generate(&request("g-1")).await.unwrap();

        assert_eq!(first.quality, Quality::Fresh);
        assert_eq!(second.quality, Quality::Cached);
        assert_eq!(second.produced_by, "model-a");
        assert_eq!(second.html, first.html);

        // Only the first request hit the backend
        assert_eq!(generator.backend.complete_calls().await.len(), 1);
    }

    #[tokio::test]
    async fn test_force_regenerate_bypasses_hit() {
        let dir = TempDir::new().unwrap();
        let generator = generator(MockBackend::new(&["model-a"]), &dir);

        let first = generator.generate(&request("g-1")).await.unwrap();
        let before = generator.cache().entry("g-1").unwrap();

        let mut forced = request("g-1");
        forced.force_regenerate = true;
        let second = generator.generate(&forced).await.unwrap();

        assert_eq!(second.quality, Quality::Fresh);
        assert_eq!(generator.backend.complete_calls().await.len(), 2);

        let after = generator.cache().entry("g-1").unwrap();
        assert!(after.created_at >= before.created_at);
        assert_eq!(first.produced_by, second.produced_by);
    }

    #[tokio::test]
    async fn test_backend_failure_is_terminal() {
        let dir = TempDir::new().unwrap();
        let backend = MockBackend::new(&["model-a"]).with_complete_error("quota exhausted");
        let generator = generator(backend, &dir);

        match generator.generate(&request("g-1")).await {
            Err(Error::Backend(BackendError::Generation { model, message })) => {
                assert_eq!(model, "model-a");
                assert!(message.contains("quota exhausted"));
            }
            other => panic!("Expected Generation error, got {:?}", other.map(|_| ())),
        }

        // The failed attempt did not retry against the next model
        assert_eq!(generator.backend.complete_calls().await.len(), 1);
        assert!(generator.cache().entry("g-1").is_none());
    }

    #[tokio::test]
    async fn test_malformed_output_persists_nothing() {
        let dir = TempDir::new().unwrap();
        let backend = MockBackend::new(&["model-a"]).with_response("sorry, no game today");
        let generator = generator(backend, &dir);

        match generator.generate(&request("g-1")).await {
            Err(Error::Extract(_)) => (),
            other => panic!("Expected Extract error, got {:?}", other.map(|_| ())),
        }
        assert!(generator.cache().entry("g-1").is_none());
    }

    #[tokio::test]
    async fn test_fenced_output_is_extracted_before_persist() {
        let dir = TempDir::new().unwrap();
        let backend = MockBackend::new(&["model-a"])
            .with_response("```html\n<!DOCTYPE html><html><body>Hi</body></html>\n``` notes");
        let generator = generator(backend, &dir);

        let result = generator.generate(&request("g-1")).await.unwrap();
        assert_eq!(result.html, "<!DOCTYPE html><html><body>Hi</body></html>");
        assert_eq!(
            generator.cache().load("g-1").unwrap(),
            result.html.as_bytes()
        );
    }

    #[tokio::test]
    async fn test_save_external_then_generate_serves_cache() {
        let dir = TempDir::new().unwrap();
        let generator = generator(MockBackend::new(&["model-a"]), &dir);

        generator
            .save_external("g-1", "<html><body>uploaded</body></html>", Some("Upload"))
            .unwrap();

        let result = generator.generate(&request("g-1")).await.unwrap();
        assert_eq!(result.quality, Quality::Cached);
        assert_eq!(result.produced_by, UNKNOWN);
        assert!(generator.backend.complete_calls().await.is_empty());
        assert_eq!(
            generator.load("g-1").unwrap(),
            "<html><body>uploaded</body></html>".as_bytes()
        );
    }

    #[tokio::test]
    async fn test_concurrent_requests_generate_once() {
        let dir = TempDir::new().unwrap();
        let generator =
            std::sync::Arc::new(generator(MockBackend::new(&["model-a"]), &dir));

        let a = {
            let g = generator.clone();
            tokio::spawn(async move { g.generate(&request("g-1")).await })
        };
        let b = {
            let g = generator.clone();
            tokio::spawn(async move { g.generate(&request("g-1")).await })
        };

        let (a, b) = (a.await.unwrap().unwrap(), b.await.unwrap().unwrap());

        // Exactly one of the two did the real work
        assert_eq!(generator.backend.complete_calls().await.len(), 1);
        assert_eq!(a.html, b.html);
    }
}
