//! Core data models for the places pipeline.

pub mod feature;
pub mod place;

pub use feature::{CenterPoint, RawFeature};
pub use place::Place;
