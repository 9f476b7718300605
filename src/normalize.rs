//! Feature normalizer: raw Overpass element to canonical [`Place`].

use thiserror::Error;

use crate::categories::CategoryRule;
use crate::config::RegionConfig;
use crate::models::{Place, RawFeature};

/// Why a raw feature was excluded from the dataset.
///
/// Rejections are recoverable by exclusion; callers count them, they are
/// never surfaced as failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Rejection {
    #[error("feature has no usable name tag")]
    MissingName,
    #[error("feature has no finite coordinates")]
    MissingCoordinates,
    #[error("feature failed the '{0}' confirmation filter")]
    Unconfirmed(&'static str),
}

/// Description tag keys in priority order. Underscores in values become
/// spaces for the plain keys; prefixed keys keep their raw value.
const DESCRIPTION_TAGS: [&str; 3] = ["leisure", "tourism", "amenity"];

const DESCRIPTION_SEPARATOR: &str = " \u{2022} ";

/// Convert one raw feature into a canonical place, or reject it.
pub fn normalize(
    feature: &RawFeature,
    rule: &CategoryRule,
    region: &RegionConfig,
) -> Result<Place, Rejection> {
    let name = feature
        .tag("name")
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .ok_or(Rejection::MissingName)?;

    if let Some(confirmation) = rule.confirmation {
        let name_lower = name.to_lowercase();
        let description_lower = feature.tag("description").unwrap_or("").to_lowercase();
        let confirmed = name_lower.contains(confirmation.keyword)
            || description_lower.contains(confirmation.keyword)
            || feature.tag(confirmation.exact_tag.key) == Some(confirmation.exact_tag.value);
        if !confirmed {
            return Err(Rejection::Unconfirmed(confirmation.keyword));
        }
    }

    let (lat, lng) = feature
        .coordinates()
        .filter(|(lat, lng)| is_usable(*lat) && is_usable(*lng))
        .ok_or(Rejection::MissingCoordinates)?;

    Ok(Place {
        id: format!("{}-{}", rule.category, feature.id),
        name: name.to_string(),
        place_type: rule.place_type.to_string(),
        coordinates: [lat, lng],
        description: build_description(feature),
        address: build_address(feature, region),
    })
}

/// Zero doubles as a missing-value sentinel in the source payloads, so
/// it is treated like a missing coordinate.
fn is_usable(degrees: f64) -> bool {
    degrees.is_finite() && degrees != 0.0
}

fn build_description(feature: &RawFeature) -> String {
    let mut parts: Vec<String> = Vec::new();

    for key in DESCRIPTION_TAGS {
        if let Some(value) = feature.tag(key) {
            parts.push(value.replace('_', " "));
        }
    }
    if let Some(sport) = feature.tag("sport") {
        parts.push(format!("Sports: {sport}"));
    }
    if let Some(kind) = feature.tag("playground") {
        parts.push(format!("Playground type: {kind}"));
    }

    parts.join(DESCRIPTION_SEPARATOR)
}

fn build_address(feature: &RawFeature, region: &RegionConfig) -> String {
    let mut parts: Vec<String> = Vec::new();

    match (feature.tag("addr:housenumber"), feature.tag("addr:street")) {
        (Some(number), Some(street)) => parts.push(format!("{number} {street}")),
        (None, Some(street)) => parts.push(street.to_string()),
        _ => {}
    }

    parts.push(
        feature
            .tag("addr:city")
            .unwrap_or(&region.default_city)
            .to_string(),
    );
    parts.push(
        feature
            .tag("addr:state")
            .unwrap_or(&region.default_state)
            .to_string(),
    );

    if let Some(postcode) = feature.tag("addr:postcode") {
        parts.push(postcode.to_string());
    }

    parts.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categories::{rule_for, Category};
    use std::collections::HashMap;

    fn feature(id: i64, tags: &[(&str, &str)], lat: Option<f64>, lon: Option<f64>) -> RawFeature {
        RawFeature {
            id,
            tags: tags
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            lat,
            lon,
            center: None,
        }
    }

    fn region() -> RegionConfig {
        RegionConfig::default()
    }

    #[test]
    fn test_basic_park() {
        let rule = rule_for(Category::Parks).unwrap();
        let raw = feature(
            42,
            &[("name", "Oak Park"), ("leisure", "park")],
            Some(39.1),
            Some(-94.5),
        );

        let place = normalize(&raw, rule, &region()).unwrap();
        assert_eq!(place.id, "parks-42");
        assert_eq!(place.name, "Oak Park");
        assert_eq!(place.place_type, "park");
        assert_eq!(place.coordinates, [39.1, -94.5]);
        assert_eq!(place.description, "park");
        assert_eq!(place.address, "Kansas City, MO");
    }

    #[test]
    fn test_missing_name_rejected() {
        let rule = rule_for(Category::Parks).unwrap();
        let raw = feature(1, &[("leisure", "park")], Some(39.1), Some(-94.5));
        assert_eq!(normalize(&raw, rule, &region()), Err(Rejection::MissingName));

        let blank = feature(
            2,
            &[("name", "   "), ("leisure", "park")],
            Some(39.1),
            Some(-94.5),
        );
        assert_eq!(
            normalize(&blank, rule, &region()),
            Err(Rejection::MissingName)
        );
    }

    #[test]
    fn test_missing_coordinates_rejected() {
        let rule = rule_for(Category::Parks).unwrap();
        let raw = feature(1, &[("name", "Oak Park")], None, None);
        assert_eq!(
            normalize(&raw, rule, &region()),
            Err(Rejection::MissingCoordinates)
        );

        let zeroed = feature(2, &[("name", "Oak Park")], Some(0.0), Some(-94.5));
        assert_eq!(
            normalize(&zeroed, rule, &region()),
            Err(Rejection::MissingCoordinates)
        );
    }

    #[test]
    fn test_center_fallback_for_ways() {
        let rule = rule_for(Category::Parks).unwrap();
        let raw = RawFeature {
            id: 7,
            tags: HashMap::from([("name".to_string(), "Swope Park".to_string())]),
            lat: None,
            lon: None,
            center: Some(crate::models::CenterPoint {
                lat: 39.01,
                lon: -94.52,
            }),
        };

        let place = normalize(&raw, rule, &region()).unwrap();
        assert_eq!(place.coordinates, [39.01, -94.52]);
    }

    #[test]
    fn test_description_priority_and_underscores() {
        let rule = rule_for(Category::Parks).unwrap();
        let raw = feature(
            1,
            &[
                ("name", "Splash Zone"),
                ("amenity", "drinking_water"),
                ("leisure", "water_park"),
                ("sport", "swimming"),
                ("playground", "splash_pad"),
            ],
            Some(39.1),
            Some(-94.5),
        );

        let place = normalize(&raw, rule, &region()).unwrap();
        assert_eq!(
            place.description,
            "water park \u{2022} drinking water \u{2022} Sports: swimming \u{2022} Playground type: splash_pad"
        );
    }

    #[test]
    fn test_full_address() {
        let rule = rule_for(Category::Museums).unwrap();
        let raw = feature(
            1,
            &[
                ("name", "Union Station"),
                ("tourism", "museum"),
                ("addr:housenumber", "30"),
                ("addr:street", "W Pershing Rd"),
                ("addr:city", "Kansas City"),
                ("addr:state", "MO"),
                ("addr:postcode", "64108"),
            ],
            Some(39.08),
            Some(-94.58),
        );

        let place = normalize(&raw, rule, &region()).unwrap();
        assert_eq!(place.address, "30 W Pershing Rd, Kansas City, MO, 64108");
    }

    #[test]
    fn test_street_without_housenumber() {
        let rule = rule_for(Category::Parks).unwrap();
        let raw = feature(
            1,
            &[("name", "Berkley Riverfront"), ("addr:street", "Grand Blvd")],
            Some(39.11),
            Some(-94.57),
        );

        let place = normalize(&raw, rule, &region()).unwrap();
        assert_eq!(place.address, "Grand Blvd, Kansas City, MO");
    }

    #[test]
    fn test_planetarium_requires_confirmation() {
        let rule = rule_for(Category::Planetariums).unwrap();

        // Shared predicate match without any planetarium signal.
        let library = feature(
            1,
            &[("name", "Central Library"), ("amenity", "library")],
            Some(39.1),
            Some(-94.58),
        );
        assert_eq!(
            normalize(&library, rule, &region()),
            Err(Rejection::Unconfirmed("planetarium"))
        );

        // Confirmed by name.
        let by_name = feature(
            2,
            &[("name", "Gottlieb Planetarium"), ("tourism", "attraction")],
            Some(39.09),
            Some(-94.58),
        );
        assert!(normalize(&by_name, rule, &region()).is_ok());

        // Confirmed by description tag.
        let by_description = feature(
            3,
            &[
                ("name", "Science City Dome"),
                ("description", "A 60-foot planetarium dome"),
            ],
            Some(39.09),
            Some(-94.58),
        );
        assert!(normalize(&by_description, rule, &region()).is_ok());

        // Confirmed by exact amenity tag.
        let by_tag = feature(
            4,
            &[("name", "Star Theater"), ("amenity", "planetarium")],
            Some(39.09),
            Some(-94.58),
        );
        assert!(normalize(&by_tag, rule, &region()).is_ok());
    }
}
