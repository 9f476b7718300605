//! Overpass API collaborator: the external geodata source behind the
//! ingestion pipeline.

use anyhow::{anyhow, Context, Result};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::categories::CategoryRule;
use crate::config::BoundingBox;
use crate::models::RawFeature;

/// Anything that can produce raw features for a category. The pipeline
/// depends on this seam, not on the HTTP transport.
pub trait FeatureSource {
    fn fetch_features(
        &self,
        rule: &CategoryRule,
        bbox: &BoundingBox,
    ) -> impl std::future::Future<Output = Result<Vec<RawFeature>>> + Send;
}

#[derive(Debug, Deserialize)]
struct OverpassResponse {
    elements: Vec<RawFeature>,
}

/// HTTP client for the Overpass interpreter endpoint.
pub struct OverpassClient {
    client: Client,
    endpoint: String,
}

impl OverpassClient {
    pub fn new(endpoint: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent("redbud/0.1 (kc-places)")
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
        })
    }

    /// Build the Overpass QL query for one category: a node, way, and
    /// relation statement per tag predicate over the bounding box, with
    /// center points for area features.
    fn build_query(rule: &CategoryRule, bbox: &BoundingBox) -> String {
        let bounds = format!(
            "({},{},{},{})",
            bbox.south, bbox.west, bbox.north, bbox.east
        );

        let mut statements = String::new();
        for predicate in rule.predicates {
            for element in ["node", "way", "relation"] {
                statements.push_str(&format!(
                    "  {element}[\"{}\"=\"{}\"]{bounds};\n",
                    predicate.key, predicate.value
                ));
            }
        }

        format!("[out:json][timeout:25];\n(\n{statements});\nout center tags;")
    }
}

impl FeatureSource for OverpassClient {
    async fn fetch_features(
        &self,
        rule: &CategoryRule,
        bbox: &BoundingBox,
    ) -> Result<Vec<RawFeature>> {
        let query = Self::build_query(rule, bbox);
        debug!("Overpass query for {}:\n{}", rule.category, query);

        let response = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "text/plain")
            .body(query)
            .send()
            .await
            .context("Overpass request failed")?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "Overpass returned status {} for {}",
                response.status(),
                rule.category
            ));
        }

        let body: OverpassResponse = response
            .json()
            .await
            .context("Failed to parse Overpass response")?;

        Ok(body.elements)
    }
}
