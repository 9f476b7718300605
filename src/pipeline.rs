//! Ingestion orchestrator.
//!
//! Runs one Overpass round trip per category, sequentially, with a
//! politeness delay between requests. A failing category contributes
//! zero places and never aborts the run.

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::categories::{rule_for, Category};
use crate::config::Config;
use crate::models::Place;
use crate::normalize::normalize;
use crate::overpass::FeatureSource;

/// Progress of one category through the ingestion run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryStatus {
    Pending,
    InFlight,
    /// Fetched and normalized; holds the number of places kept.
    Done(usize),
    Failed,
}

#[derive(Debug, Clone, Copy)]
pub struct CategoryOutcome {
    pub category: Category,
    pub status: CategoryStatus,
}

/// Fetch and normalize all requested categories.
///
/// Returns the concatenated place collection (not yet deduplicated) and
/// a per-category outcome for the run summary.
pub async fn ingest<S: FeatureSource>(
    source: &S,
    categories: &[Category],
    config: &Config,
) -> (Vec<Place>, Vec<CategoryOutcome>) {
    let delay = Duration::from_millis(config.ingest.request_delay_ms);
    let mut places: Vec<Place> = Vec::new();
    let mut outcomes: Vec<CategoryOutcome> = categories
        .iter()
        .map(|&category| CategoryOutcome {
            category,
            status: CategoryStatus::Pending,
        })
        .collect();

    for (i, outcome) in outcomes.iter_mut().enumerate() {
        // Politeness delay toward the shared Overpass service, between
        // requests rather than after the last one.
        if i > 0 && !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let category = outcome.category;
        let Some(rule) = rule_for(category) else {
            debug!("No vocabulary rule for {category}, skipping");
            outcome.status = CategoryStatus::Done(0);
            continue;
        };

        outcome.status = CategoryStatus::InFlight;
        info!("Fetching {category}...");

        let features = match source.fetch_features(rule, &config.region.bbox).await {
            Ok(features) => features,
            Err(e) => {
                warn!("Fetching {category} failed: {e:#}");
                outcome.status = CategoryStatus::Failed;
                continue;
            }
        };

        let mut kept: Vec<Place> = Vec::new();
        let mut rejected = 0usize;
        for feature in &features {
            match normalize(feature, rule, &config.region) {
                Ok(place) => kept.push(place),
                Err(rejection) => {
                    debug!("Rejected {} feature {}: {rejection}", category, feature.id);
                    rejected += 1;
                }
            }
        }

        kept.truncate(config.ingest.max_per_category);
        info!(
            "{category}: {} features, {} kept, {} rejected",
            features.len(),
            kept.len(),
            rejected
        );

        outcome.status = CategoryStatus::Done(kept.len());
        places.extend(kept);
    }

    (places, outcomes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categories::CategoryRule;
    use crate::config::BoundingBox;
    use crate::dedupe::dedupe;
    use crate::models::RawFeature;
    use crate::search::filter_by_types;
    use anyhow::{anyhow, Result};
    use std::collections::HashMap;

    /// Serves canned features per category; errors for listed ones.
    struct FakeSource {
        features: HashMap<Category, Vec<RawFeature>>,
        failing: Vec<Category>,
    }

    impl FeatureSource for FakeSource {
        async fn fetch_features(
            &self,
            rule: &CategoryRule,
            _bbox: &BoundingBox,
        ) -> Result<Vec<RawFeature>> {
            if self.failing.contains(&rule.category) {
                return Err(anyhow!("overpass unreachable"));
            }
            Ok(self.features.get(&rule.category).cloned().unwrap_or_default())
        }
    }

    fn raw(id: i64, tags: &[(&str, &str)], lat: f64, lon: f64) -> RawFeature {
        RawFeature {
            id,
            tags: tags
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            lat: Some(lat),
            lon: Some(lon),
            center: None,
        }
    }

    fn fast_config() -> Config {
        let mut config = Config::default();
        config.ingest.request_delay_ms = 0;
        config
    }

    #[tokio::test]
    async fn test_end_to_end_ingest_dedupe_filter() {
        let source = FakeSource {
            features: HashMap::from([
                (
                    Category::Parks,
                    vec![
                        raw(1, &[("name", "Oak Park"), ("leisure", "park")], 39.1, -94.5),
                        // Near-duplicate of the first, within epsilon.
                        raw(
                            2,
                            &[("name", "Oak Park"), ("leisure", "park")],
                            39.1002,
                            -94.5001,
                        ),
                    ],
                ),
                (
                    Category::Museums,
                    vec![raw(
                        3,
                        &[("name", "City Museum"), ("tourism", "museum")],
                        39.05,
                        -94.55,
                    )],
                ),
            ]),
            failing: vec![],
        };

        let (places, outcomes) = ingest(
            &source,
            &[Category::Parks, Category::Museums],
            &fast_config(),
        )
        .await;
        let places = dedupe(places);

        assert_eq!(places.len(), 2);
        assert_eq!(places[0].name, "Oak Park");
        assert_eq!(places[1].name, "City Museum");

        let museums = filter_by_types(&places, &["museum".to_string()]);
        assert_eq!(museums.len(), 1);
        assert_eq!(museums[0].name, "City Museum");

        assert_eq!(outcomes[0].status, CategoryStatus::Done(2));
        assert_eq!(outcomes[1].status, CategoryStatus::Done(1));
    }

    #[tokio::test]
    async fn test_failing_category_does_not_abort_others() {
        let source = FakeSource {
            features: HashMap::from([(
                Category::Museums,
                vec![raw(
                    3,
                    &[("name", "City Museum"), ("tourism", "museum")],
                    39.05,
                    -94.55,
                )],
            )]),
            failing: vec![Category::Parks],
        };

        let (places, outcomes) = ingest(
            &source,
            &[Category::Parks, Category::Museums],
            &fast_config(),
        )
        .await;

        assert_eq!(places.len(), 1);
        assert_eq!(outcomes[0].status, CategoryStatus::Failed);
        assert_eq!(outcomes[1].status, CategoryStatus::Done(1));
    }

    #[tokio::test]
    async fn test_per_category_cap_preserves_source_order() {
        let features: Vec<RawFeature> = (0..60)
            .map(|i| {
                raw(
                    i,
                    &[("name", &format!("Park {i}")[..]), ("leisure", "park")],
                    39.0 + i as f64 * 0.002,
                    -94.5,
                )
            })
            .collect();

        let source = FakeSource {
            features: HashMap::from([(Category::Parks, features)]),
            failing: vec![],
        };

        let (places, _) = ingest(&source, &[Category::Parks], &fast_config()).await;
        assert_eq!(places.len(), 50);
        assert_eq!(places[0].name, "Park 0");
        assert_eq!(places[49].name, "Park 49");
    }

    #[tokio::test]
    async fn test_unnamed_features_are_dropped() {
        let source = FakeSource {
            features: HashMap::from([(
                Category::Parks,
                vec![
                    raw(1, &[("leisure", "park")], 39.1, -94.5),
                    raw(2, &[("name", "Penn Valley Park")], 39.08, -94.59),
                ],
            )]),
            failing: vec![],
        };

        let (places, outcomes) = ingest(&source, &[Category::Parks], &fast_config()).await;
        assert_eq!(places.len(), 1);
        assert_eq!(places[0].name, "Penn Valley Park");
        assert_eq!(outcomes[0].status, CategoryStatus::Done(1));
    }
}
