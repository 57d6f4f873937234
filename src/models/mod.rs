//! Request and result types for game generation

use serde::{Deserialize, Serialize};

pub mod display;

/// Structured game design payload.
///
/// The orchestrator treats this as opaque beyond the handful of summary
/// fields the prompt builder reads. Every field defaults so a sparse or
/// hand-written design document still parses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameDesign {
    pub metadata: DesignMetadata,
    pub inputs: DesignInputs,
    pub game_design_spec: DesignSpec,
    pub balancing: Balancing,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignMetadata {
    pub project_name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignInputs {
    pub genre: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignSpec {
    pub factions: Vec<Faction>,
    pub economy: Economy,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Faction {
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Economy {
    pub resources: Vec<ResourceDef>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceDef {
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Balancing {
    pub units: Vec<UnitDef>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UnitDef {
    pub unit_name: String,
}

impl GameDesign {
    /// Project name, falling back to a generic label
    pub fn project_name(&self) -> &str {
        self.metadata
            .project_name
            .as_deref()
            .unwrap_or("Strategy Game")
    }
}

/// One generation request
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// Caller-supplied opaque key for the artifact
    pub id: String,

    /// Design payload driving the prompt
    pub design: GameDesign,

    /// Skip the cache check and regenerate unconditionally
    pub force_regenerate: bool,
}

/// Where a generation result came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    Cached,
    Fresh,
}

/// Reporting-only stats derived from the artifact and the request payload
#[derive(Debug, Clone, Serialize)]
pub struct GenerationStats {
    pub html_bytes: usize,
    pub factions: usize,
    pub units: usize,
}

/// A generated (or cache-served) game artifact
#[derive(Debug, Clone)]
pub struct GenerationResult {
    pub id: String,
    pub html: String,
    pub produced_by: String,
    pub quality: Quality,
    pub stats: GenerationStats,
}
