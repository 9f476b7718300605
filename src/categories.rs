//! Category vocabulary: the fixed activity categories, their source tag
//! predicates, and the canonical place-type mapping.
//!
//! Categories are data, not code paths. Each category maps to an ordered
//! list of OSM tag predicates used to build Overpass queries, a singular
//! place-type string used in the output dataset, and an optional
//! confirmation rule for categories whose predicates are ambiguous.

use serde::{Deserialize, Serialize};

/// Activity category grouping places in the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Playgrounds,
    Parks,
    Museums,
    Galleries,
    Science,
    Planetariums,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Playgrounds,
        Category::Parks,
        Category::Museums,
        Category::Galleries,
        Category::Science,
        Category::Planetariums,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Playgrounds => "playgrounds",
            Category::Parks => "parks",
            Category::Museums => "museums",
            Category::Galleries => "galleries",
            Category::Science => "science",
            Category::Planetariums => "planetariums",
        }
    }

    /// Canonical singular place type stored on output records.
    pub fn place_type(&self) -> &'static str {
        match self {
            Category::Playgrounds => "playground",
            Category::Parks => "park",
            Category::Museums => "museum",
            Category::Galleries => "gallery",
            Category::Science => "science_center",
            Category::Planetariums => "planetarium",
        }
    }

    /// Inverse of [`Category::place_type`], for consumers matching
    /// returned places back to a category.
    pub fn from_place_type(place_type: &str) -> Option<Category> {
        Category::ALL
            .into_iter()
            .find(|c| c.place_type() == place_type)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("unknown category: {s}"))
    }
}

/// A single key=value tag match against the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagPredicate {
    pub key: &'static str,
    pub value: &'static str,
}

/// Extra acceptance step for categories whose tag predicates overlap
/// with unrelated venue types.
#[derive(Debug, Clone, Copy)]
pub struct Confirmation {
    /// Keyword that must appear (case-insensitively) in the feature's
    /// name or description tag.
    pub keyword: &'static str,
    /// Exact tag match that confirms the feature regardless of text.
    pub exact_tag: TagPredicate,
}

/// Query and labeling rules for one category.
#[derive(Debug, Clone, Copy)]
pub struct CategoryRule {
    pub category: Category,
    pub predicates: &'static [TagPredicate],
    pub place_type: &'static str,
    pub confirmation: Option<Confirmation>,
}

const RULES: [CategoryRule; 6] = [
    CategoryRule {
        category: Category::Playgrounds,
        predicates: &[TagPredicate {
            key: "leisure",
            value: "playground",
        }],
        place_type: "playground",
        confirmation: None,
    },
    CategoryRule {
        category: Category::Parks,
        predicates: &[
            TagPredicate {
                key: "leisure",
                value: "park",
            },
            TagPredicate {
                key: "leisure",
                value: "water_park",
            },
            TagPredicate {
                key: "leisure",
                value: "swimming_pool",
            },
            TagPredicate {
                key: "tourism",
                value: "picnic_site",
            },
            TagPredicate {
                key: "natural",
                value: "beach",
            },
        ],
        place_type: "park",
        confirmation: None,
    },
    CategoryRule {
        category: Category::Museums,
        predicates: &[
            TagPredicate {
                key: "tourism",
                value: "museum",
            },
            TagPredicate {
                key: "amenity",
                value: "library",
            },
        ],
        place_type: "museum",
        confirmation: None,
    },
    CategoryRule {
        category: Category::Galleries,
        predicates: &[TagPredicate {
            key: "tourism",
            value: "gallery",
        }],
        place_type: "gallery",
        confirmation: None,
    },
    CategoryRule {
        category: Category::Science,
        predicates: &[
            TagPredicate {
                key: "amenity",
                value: "science_center",
            },
            TagPredicate {
                key: "tourism",
                value: "science_center",
            },
        ],
        place_type: "science_center",
        confirmation: None,
    },
    CategoryRule {
        category: Category::Planetariums,
        predicates: &[TagPredicate {
            key: "amenity",
            value: "planetarium",
        }],
        place_type: "planetarium",
        // "planetarium" shows up attached to libraries and museums via
        // shared tags; require the word itself or the exact amenity.
        confirmation: Some(Confirmation {
            keyword: "planetarium",
            exact_tag: TagPredicate {
                key: "amenity",
                value: "planetarium",
            },
        }),
    },
];

/// All category rules in query order.
pub fn rules() -> &'static [CategoryRule] {
    &RULES
}

/// Look up the rule for a category. `None` means no vocabulary entry,
/// which callers treat as zero results.
pub fn rule_for(category: Category) -> Option<&'static CategoryRule> {
    RULES.iter().find(|r| r.category == category)
}
