//! Run configuration.
//!
//! Loaded from a JSON file or built from defaults. The insight API
//! credential lives here and is injected into the client explicitly;
//! nothing in the library reads the process environment.

use crate::error::SimResult;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_POPULATION_SIZE: usize = 5_000;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Synthetic users generated per simulation run.
    pub population_size: usize,
    pub insight: InsightConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            population_size: DEFAULT_POPULATION_SIZE,
            insight: InsightConfig::default(),
        }
    }
}

impl SimConfig {
    pub fn load(path: &Path) -> SimResult<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("reading config {}: {e}", path.display()))?;
        Ok(serde_json::from_str(&raw)?)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InsightConfig {
    /// Generative-language API key. None degrades every insight request
    /// to a fixed guidance response instead of erroring.
    pub api_key: Option<String>,
    pub model: String,
    pub endpoint: String,
    pub timeout_secs: u64,
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gemini-2.0-flash-lite".to_string(),
            endpoint: "https://generativelanguage.googleapis.com".to_string(),
            timeout_secs: 20,
        }
    }
}
