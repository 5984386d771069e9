//! Category rule sets: the keyword/weight tables driving content scoring,
//! category detection and viewpoint analysis.
//!
//! Rules are data, not control flow. The built-in defaults cover the common
//! marketplace categories; deployments can replace them wholesale from a
//! TOML file.

use std::collections::BTreeMap;

use serde::Deserialize;

/// Keyword to signed weight mapping. Ordered so that first-match-wins
/// scoring stays deterministic.
pub type KeywordWeights = BTreeMap<String, f32>;

/// Keyword tables for one product category.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CategoryRules {
    /// Strong positive, category-defining keywords.
    pub primary: KeywordWeights,
    /// Weak positive material/accessory cues, credited at 30% to the
    /// currently leading category.
    pub secondary: KeywordWeights,
    /// Negative weights for component close-up cues.
    pub details: KeywordWeights,
    /// Negative weights for unwanted content (people, poor quality).
    pub negative: KeywordWeights,
}

/// The complete, immutable rule configuration for an analysis run.
///
/// Viewpoint cues are shared across categories because the viewpoint is
/// scored before the product category is known.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CategoryRuleSet {
    /// Per-category keyword tables.
    pub categories: BTreeMap<String, CategoryRules>,
    /// Positive front-view cues.
    pub front_view: KeywordWeights,
    /// Negative back-view cues.
    pub back_view: KeywordWeights,
    /// Category reported when detection finds no evidence.
    pub default_category: String,
}

impl CategoryRuleSet {
    /// Returns the rules for `category`, if configured.
    #[must_use]
    pub fn get(&self, category: &str) -> Option<&CategoryRules> {
        self.categories.get(category)
    }

    /// Finds the first keyword in `weights` contained in `label` and returns
    /// its weight. `label` must already be lowercased.
    #[must_use]
    pub fn first_match(weights: &KeywordWeights, label: &str) -> Option<f32> {
        weights
            .iter()
            .find(|(keyword, _)| label.contains(keyword.as_str()))
            .map(|(_, weight)| *weight)
    }
}

fn weights(entries: &[(&str, f32)]) -> KeywordWeights {
    entries
        .iter()
        .map(|(keyword, weight)| ((*keyword).to_string(), *weight))
        .collect()
}

/// Quality/people penalties shared by every built-in category.
fn common_negative() -> KeywordWeights {
    weights(&[
        ("person", -3.0),
        ("face", -3.0),
        ("people", -3.0),
        ("blur", -2.0),
        ("noise", -1.5),
        ("dark", -1.5),
        ("low", -1.5),
    ])
}

impl Default for CategoryRuleSet {
    fn default() -> Self {
        let mut categories = BTreeMap::new();

        categories.insert(
            "bags".to_string(),
            CategoryRules {
                primary: weights(&[
                    ("mailbag", 4.0),
                    ("postbag", 4.0),
                    ("backpack", 4.0),
                    ("knapsack", 4.0),
                    ("packsack", 4.0),
                    ("rucksack", 4.0),
                    ("haversack", 4.0),
                    ("purse", 4.0),
                    ("handbag", 4.0),
                    ("tote", 3.5),
                    ("clutch", 3.5),
                    ("satchel", 3.5),
                    ("messenger", 3.5),
                ]),
                secondary: weights(&[
                    ("leather", 2.0),
                    ("fabric", 1.5),
                    ("textile", 1.5),
                    ("accessory", 1.0),
                ]),
                details: weights(&[
                    ("buckle", -2.0),
                    ("whistle", -2.0),
                    ("watch", -2.0),
                    ("digital", -2.0),
                    ("pencil", -2.0),
                    ("iron", -2.0),
                    ("mouse", -2.0),
                    ("stopwatch", -2.0),
                    ("muzzle", -2.0),
                    ("holster", -2.0),
                    ("strap", -1.5),
                    ("handle", -1.5),
                    ("zipper", -1.0),
                    ("button", -1.0),
                    ("pocket", -0.5),
                ]),
                negative: common_negative(),
            },
        );

        categories.insert(
            "clothing".to_string(),
            CategoryRules {
                primary: weights(&[
                    ("shirt", 4.0),
                    ("dress", 4.0),
                    ("jacket", 4.0),
                    ("coat", 4.0),
                    ("sweater", 4.0),
                    ("jersey", 3.5),
                    ("blouse", 3.5),
                    ("skirt", 3.5),
                    ("trouser", 3.5),
                ]),
                secondary: weights(&[("fabric", 1.5), ("textile", 1.5), ("wool", 1.5)]),
                details: weights(&[
                    ("button", -1.0),
                    ("zipper", -1.0),
                    ("collar", -0.5),
                    ("sleeve", -0.5),
                    ("pocket", -0.5),
                ]),
                negative: common_negative(),
            },
        );

        categories.insert(
            "electronics".to_string(),
            CategoryRules {
                primary: weights(&[
                    ("cellular telephone", 4.0),
                    ("laptop", 4.0),
                    ("notebook", 4.0),
                    ("desktop computer", 4.0),
                    ("camera", 4.0),
                    ("tablet", 4.0),
                    ("monitor", 3.5),
                    ("television", 3.5),
                ]),
                secondary: weights(&[("electronic", 1.5), ("accessory", 1.0)]),
                details: weights(&[
                    ("cable", -1.5),
                    ("charger", -1.5),
                    ("button", -1.0),
                    ("antenna", -1.0),
                    ("plug", -1.0),
                    ("screen", -0.5),
                ]),
                negative: common_negative(),
            },
        );

        categories.insert(
            "jewelry".to_string(),
            CategoryRules {
                primary: weights(&[
                    ("necklace", 4.0),
                    ("earring", 4.0),
                    ("bracelet", 4.0),
                    ("pendant", 4.0),
                    ("brooch", 4.0),
                    ("ring", 3.5),
                ]),
                secondary: weights(&[
                    ("gem", 2.0),
                    ("diamond", 2.0),
                    ("gold", 1.5),
                    ("silver", 1.5),
                ]),
                details: weights(&[("clasp", -1.0), ("chain", -0.5)]),
                negative: common_negative(),
            },
        );

        categories.insert(
            "shoes".to_string(),
            CategoryRules {
                primary: weights(&[
                    ("running shoe", 4.0),
                    ("boot", 4.0),
                    ("sneaker", 4.0),
                    ("sandal", 4.0),
                    ("loafer", 4.0),
                    ("clog", 3.5),
                    ("shoe", 3.5),
                ]),
                secondary: weights(&[("leather", 2.0), ("suede", 1.5)]),
                details: weights(&[
                    ("sole", -1.5),
                    ("lace", -1.0),
                    ("insole", -1.0),
                    ("heel", -0.5),
                ]),
                negative: common_negative(),
            },
        );

        categories.insert(
            "cosmetics".to_string(),
            CategoryRules {
                primary: weights(&[
                    ("lipstick", 4.0),
                    ("perfume", 4.0),
                    ("lotion", 3.5),
                    ("face powder", 3.5),
                    ("sunscreen", 3.5),
                    ("hair spray", 3.5),
                ]),
                secondary: weights(&[("bottle", 1.0), ("jar", 1.0)]),
                details: weights(&[
                    ("brush", -1.5),
                    ("applicator", -1.5),
                    ("tube", -1.0),
                    ("mirror", -1.0),
                ]),
                negative: common_negative(),
            },
        );

        categories.insert(
            "general".to_string(),
            CategoryRules {
                primary: weights(&[("product", 2.0), ("object", 2.0), ("item", 2.0)]),
                secondary: weights(&[
                    ("accessory", 1.0),
                    ("material", 1.0),
                    ("texture", 1.0),
                ]),
                details: weights(&[("part", -1.0), ("component", -1.0)]),
                negative: common_negative(),
            },
        );

        Self {
            categories,
            front_view: weights(&[
                ("front", 1.0),
                ("main", 0.8),
                ("open", 0.8),
                ("display", 0.8),
                ("forward", 0.8),
                ("center", 0.6),
                ("face", 0.5),
            ]),
            back_view: weights(&[
                ("back", -0.5),
                ("rear", -0.5),
                ("behind", -0.5),
                ("reverse", -0.3),
                ("strap", -0.2),
                ("zipper", -0.2),
                ("handle", -0.1),
                ("pocket", -0.1),
            ]),
            default_category: "general".to_string(),
        }
    }
}
