//! Raw tagged feature as returned by the Overpass API.

use serde::Deserialize;
use std::collections::HashMap;

/// Center point reported for way/relation features (`out center`).
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct CenterPoint {
    pub lat: f64,
    pub lon: f64,
}

/// One element of an Overpass response.
///
/// Transient: consumed once by the normalizer and discarded. Nodes carry
/// `lat`/`lon` directly; ways and relations carry a `center` pair
/// instead. Unknown payload fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct RawFeature {
    pub id: i64,
    #[serde(default)]
    pub tags: HashMap<String, String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub center: Option<CenterPoint>,
}

impl RawFeature {
    /// Get a tag value by key.
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }

    /// Resolve the feature's coordinates, preferring the direct pair
    /// over the way/relation center.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            _ => self.center.map(|c| (c.lat, c.lon)),
        }
    }
}
