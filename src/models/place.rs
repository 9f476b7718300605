//! Canonical place record served to consumers.

use serde::{Deserialize, Serialize};

/// A normalized, deduplicated place.
///
/// This is the unit of the persisted dataset: a flat JSON array of these
/// records, all fields required. `coordinates` is `[lat, lng]` in
/// degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    /// Unique within the dataset: "{category}-{source feature id}".
    pub id: String,
    /// Display name, never empty after normalization.
    pub name: String,
    /// Canonical singular place type (e.g. "museum", not "museums").
    #[serde(rename = "type")]
    pub place_type: String,
    /// [lat, lng] pair, both finite.
    pub coordinates: [f64; 2],
    /// Human-readable summary derived from source tags; may be empty.
    pub description: String,
    /// Postal address with city/state defaults applied; never empty.
    pub address: String,
}

impl Place {
    pub fn lat(&self) -> f64 {
        self.coordinates[0]
    }

    pub fn lng(&self) -> f64 {
        self.coordinates[1]
    }
}
