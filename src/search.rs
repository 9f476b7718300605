//! Query engine over the canonical place collection.
//!
//! Pure functions: the dataset is loaded once and treated as read-only.
//! The quality gate runs here as well as at ingestion time, so the query
//! path never assumes the stored dataset is already clean.

use crate::models::Place;

/// Keep places whose type is in `types` and which pass the data-quality
/// gate. Input order is preserved.
pub fn filter_by_types(places: &[Place], types: &[String]) -> Vec<Place> {
    places
        .iter()
        .filter(|place| types.iter().any(|t| t == &place.place_type))
        .filter(|place| passes_quality(place))
        .cloned()
        .collect()
}

/// Case-insensitive substring search over name, description, and
/// address, applied after the type filter. A blank query behaves exactly
/// as [`filter_by_types`]. No ranking; filter order is kept.
pub fn search(places: &[Place], query: &str, types: &[String]) -> Vec<Place> {
    let base = filter_by_types(places, types);

    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return base;
    }

    base.into_iter()
        .filter(|place| {
            place.name.to_lowercase().contains(&query)
                || place.description.to_lowercase().contains(&query)
                || place.address.to_lowercase().contains(&query)
        })
        .collect()
}

/// Data-quality gate: placeholder or blank names and non-finite
/// coordinates are excluded regardless of how the record was stored.
fn passes_quality(place: &Place) -> bool {
    let name = place.name.trim();
    if name.is_empty() || name == "Unknown" {
        return false;
    }
    place.coordinates.iter().all(|c| c.is_finite())
}
