//! Persisted place dataset.
//!
//! The canonical collection is one JSON array file, read wholesale into
//! memory on first access and immutable for the rest of the process.
//! The load is single-flight: concurrent first accesses converge on one
//! read and share the same cached slice.

use std::path::{Path, PathBuf};

use tokio::sync::OnceCell;
use tracing::{error, info, warn};

use crate::models::Place;

pub struct PlaceStore {
    path: PathBuf,
    cache: OnceCell<Vec<Place>>,
}

impl PlaceStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            cache: OnceCell::new(),
        }
    }

    /// The canonical place collection.
    ///
    /// Loaded lazily on first call; later calls return the same cached
    /// slice. A missing or unreadable dataset yields an empty collection
    /// with the cause logged, never an error.
    pub async fn places(&self) -> &[Place] {
        self.cache.get_or_init(|| load(self.path.clone())).await
    }
}

async fn load(path: PathBuf) -> Vec<Place> {
    let content = match tokio::fs::read_to_string(&path).await {
        Ok(content) => content,
        Err(e) => {
            error!("Failed to read places dataset {}: {e}", path.display());
            return Vec::new();
        }
    };

    let entries: Vec<serde_json::Value> = match serde_json::from_str(&content) {
        Ok(entries) => entries,
        Err(e) => {
            error!("Places dataset {} is not a JSON array: {e}", path.display());
            return Vec::new();
        }
    };

    // Deserialize per element so one malformed record doesn't take the
    // whole dataset down with it.
    let total = entries.len();
    let mut places: Vec<Place> = Vec::with_capacity(total);
    for entry in entries {
        match serde_json::from_value::<Place>(entry) {
            Ok(place) => places.push(place),
            Err(e) => warn!("Skipping malformed place record: {e}"),
        }
    }

    if places.len() < total {
        warn!(
            "Loaded {} of {} place records from {}",
            places.len(),
            total,
            path.display()
        );
    } else {
        info!("Loaded {} place records from {}", places.len(), path.display());
    }

    places
}
