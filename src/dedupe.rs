//! Deduplication of the ingested place collection.

use crate::models::Place;

/// Coordinate-difference threshold below which two places count as the
/// same real-world location. Roughly 100 m at Kansas City's latitude.
/// Not corrected for latitude.
pub const PROXIMITY_EPSILON_DEG: f64 = 0.001;

/// Collapse records that represent the same real-world place.
///
/// Greedy single pass: a candidate is dropped when an already-accepted
/// place has the identical name, or differs by less than
/// [`PROXIMITY_EPSILON_DEG`] on both axes. First seen wins; attributes
/// are never merged. O(n²) in the accepted set, which is bounded by the
/// per-category cap times the category count.
pub fn dedupe(places: Vec<Place>) -> Vec<Place> {
    let mut accepted: Vec<Place> = Vec::with_capacity(places.len());

    for candidate in places {
        let duplicate = accepted.iter().any(|existing| {
            existing.name == candidate.name
                || ((existing.lat() - candidate.lat()).abs() < PROXIMITY_EPSILON_DEG
                    && (existing.lng() - candidate.lng()).abs() < PROXIMITY_EPSILON_DEG)
        });

        if !duplicate {
            accepted.push(candidate);
        }
    }

    accepted
}
