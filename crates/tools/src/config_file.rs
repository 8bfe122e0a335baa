//! Loading generator configs from JSON files.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use seedmap::MapGenConfig;

/// Read and validate a config; `None` yields the canonical defaults.
pub fn load_config(path: Option<&Path>) -> Result<MapGenConfig> {
    let Some(path) = path else {
        return Ok(MapGenConfig::default());
    };
    let data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config: MapGenConfig = serde_json::from_str(&data)
        .with_context(|| format!("Failed to parse config JSON: {}", path.display()))?;
    config.validate().with_context(|| format!("Invalid config: {}", path.display()))?;
    Ok(config)
}
