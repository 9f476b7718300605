//! Redbud - kid-friendly places for the Kansas City metro.
//!
//! This library provides the shared core for the `ingest` and `query`
//! binaries: the category vocabulary, the Overpass feature normalizer,
//! the ingestion pipeline, the deduplication pass, and the query engine
//! over the persisted dataset.

pub mod categories;
pub mod config;
pub mod dedupe;
pub mod models;
pub mod normalize;
pub mod overpass;
pub mod pipeline;
pub mod search;
pub mod store;

pub use categories::{Category, CategoryRule};
pub use models::{Place, RawFeature};
