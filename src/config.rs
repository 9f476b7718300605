//! TOML configuration with defaults for the Kansas City deployment.
//!
//! Every section has a full `Default`, so both binaries run without a
//! config file.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub overpass: OverpassConfig,
    pub region: RegionConfig,
    pub ingest: IngestConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct OverpassConfig {
    pub endpoint: String,
}

impl Default for OverpassConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://overpass-api.de/api/interpreter".to_string(),
        }
    }
}

/// Query bounding box, degrees.
#[derive(Debug, Deserialize, Clone, Copy)]
pub struct BoundingBox {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl Default for BoundingBox {
    /// Kansas City metro.
    fn default() -> Self {
        Self {
            south: 39.0,
            west: -94.7,
            north: 39.2,
            east: -94.4,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct RegionConfig {
    pub bbox: BoundingBox,
    /// City used when a feature has no addr:city tag.
    pub default_city: String,
    /// State used when a feature has no addr:state tag.
    pub default_state: String,
}

impl Default for RegionConfig {
    fn default() -> Self {
        Self {
            bbox: BoundingBox::default(),
            default_city: "Kansas City".to_string(),
            default_state: "MO".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct IngestConfig {
    /// Cap on normalized results kept per category, in source order.
    pub max_per_category: usize,
    /// Politeness delay between Overpass requests.
    pub request_delay_ms: u64,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            max_per_category: 50,
            request_delay_ms: 1000,
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read config file")?;
        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }
}
