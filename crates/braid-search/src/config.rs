use anyhow::{Context, Result};
use braid_core::RrfConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level pipeline configuration, conventionally loaded from
/// `braid.toml`. Every field has a default, so a missing or partial file
/// is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default)]
    pub fusion: RrfConfig,
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            fusion: RrfConfig::default(),
            pipeline: PipelineConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Hard cap on the candidate count a single request may ask for.
    #[serde(default = "default_max_limit")]
    pub max_limit: usize,
    /// Each backend is asked for `limit * overfetch_factor` candidates so
    /// fusion sees deep enough lists before the final truncation.
    #[serde(default = "default_overfetch_factor")]
    pub overfetch_factor: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_limit: default_max_limit(),
            overfetch_factor: default_overfetch_factor(),
        }
    }
}

/// Load configuration from `path`.
///
/// A missing file yields [`SearchConfig::default`]. A file that exists
/// must parse, and its `[fusion]` section must pass
/// [`RrfConfig::validate`]; rejecting bad tunables here keeps every later
/// fusion call infallible with respect to configuration.
///
/// # Errors
///
/// Read failures, TOML parse failures, and invalid fusion parameters.
pub fn load_config(path: &Path) -> Result<SearchConfig> {
    if !path.exists() {
        return Ok(SearchConfig::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let config: SearchConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    config
        .fusion
        .validate()
        .with_context(|| format!("Invalid [fusion] section in {}", path.display()))?;

    Ok(config)
}

const fn default_max_limit() -> usize {
    1000
}

const fn default_overfetch_factor() -> usize {
    2
}
