//! The category table: one [`CategoryPlan`] per product line, with its
//! canonical spelling, the historical spellings that get rewritten to it, the
//! asset directories it draws images from, and its target population.

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::ConfigError;

static SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[_\-]+").expect("valid regex"));

/// How synthesized product names are labelled before the running index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Naming {
    /// Label from the image file name; `fallback` when the name yields nothing.
    FromFile { fallback: &'static str },
    /// Same label for every record regardless of the image file.
    Fixed { prefix: &'static str },
}

impl Naming {
    /// Label for a record drawing its image from `file_name`.
    #[must_use]
    pub fn label_for(&self, file_name: &str) -> String {
        match self {
            Naming::FromFile { fallback } => {
                let label = derive_label(file_name);
                if label.is_empty() {
                    (*fallback).to_string()
                } else {
                    label
                }
            }
            Naming::Fixed { prefix } => (*prefix).to_string(),
        }
    }
}

/// Reconciliation settings for one product line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryPlan {
    pub canonical: &'static str,
    /// Historical spellings rewritten to `canonical`. Never contains `canonical`.
    pub aliases: &'static [&'static str],
    /// Candidate asset directories, probed in order.
    pub source_dirs: &'static [&'static str],
    pub target: usize,
    pub brand: &'static str,
    pub naming: Naming,
    /// Description is rendered as `"{description_prefix} - {product_name}"`.
    pub description_prefix: &'static str,
}

impl CategoryPlan {
    /// Whether an asset directory belongs to this product line, either as a
    /// source directory or because its name is one of the line's spellings.
    #[must_use]
    pub fn owns_directory(&self, name: &str) -> bool {
        self.canonical == name
            || self.source_dirs.contains(&name)
            || self.aliases.contains(&name)
    }

    #[must_use]
    pub fn describe(&self, product_name: &str) -> String {
        format!("{} - {product_name}", self.description_prefix)
    }
}

const PLANS: &[CategoryPlan] = &[
    CategoryPlan {
        canonical: "watches",
        aliases: &["watch", "Watch", "Watches"],
        source_dirs: &["watches"],
        target: 50,
        brand: "Watches",
        naming: Naming::FromFile { fallback: "Watch" },
        description_prefix: "Sample watches",
    },
    CategoryPlan {
        canonical: "mobiles",
        aliases: &["mobile"],
        source_dirs: &["mobiles", "mobile"],
        target: 100,
        brand: "Mobiles",
        naming: Naming::FromFile { fallback: "Mobile" },
        description_prefix: "Sample mobiles",
    },
    CategoryPlan {
        canonical: "Mouse",
        aliases: &["mouse", "mice"],
        source_dirs: &["mice", "mouse"],
        target: 50,
        brand: "Mouse",
        naming: Naming::FromFile { fallback: "Mouse" },
        description_prefix: "Sample Mouse",
    },
    CategoryPlan {
        canonical: "Televisions",
        aliases: &["TV", "tv", "Television", "television", "televisions"],
        source_dirs: &["TV", "tv", "television", "televisions", "TVs", "tvS"],
        target: 50,
        brand: "Television",
        naming: Naming::FromFile {
            fallback: "Television",
        },
        description_prefix: "Sample television",
    },
    CategoryPlan {
        canonical: "Bluetooth Speakers",
        aliases: &[
            "speakers",
            "Speakers",
            "Speaker",
            "speaker",
            "bluetooth speakers",
            "Bluetooth speakers",
        ],
        source_dirs: &["speakers"],
        target: 50,
        brand: "Bluetooth Speakers",
        naming: Naming::Fixed {
            prefix: "Bluetooth Speakers",
        },
        description_prefix: "Bluetooth Speakers",
    },
    CategoryPlan {
        canonical: "Refrigerator",
        aliases: &["refrigerator", "Refrigerators", "Refrigeration"],
        source_dirs: &["refrigerator"],
        target: 50,
        brand: "Refrigerator",
        naming: Naming::Fixed {
            prefix: "Refrigerator",
        },
        description_prefix: "Refrigerator",
    },
    CategoryPlan {
        canonical: "Trimmers",
        aliases: &["trimmers", "trimmer", "Trimmer"],
        source_dirs: &["trimmers"],
        target: 25,
        brand: "Trimmer",
        naming: Naming::Fixed { prefix: "Trimmer" },
        description_prefix: "Trimmer",
    },
];

/// Built-in plans in processing order.
#[must_use]
pub fn builtin_plans() -> &'static [CategoryPlan] {
    PLANS
}

/// Human label for an image file: the stem with runs of `_`/`-` collapsed to
/// a single space, trimmed. May be empty.
#[must_use]
pub fn derive_label(file_name: &str) -> String {
    let stem = Path::new(file_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(file_name);
    SEPARATORS.replace_all(stem, " ").trim().to_string()
}

/// Validate a set of category plans.
///
/// # Errors
///
/// Returns [`ConfigError::Validation`] when a plan is malformed or when two
/// plans claim the same spelling.
pub fn validate_category_plans(plans: &[CategoryPlan]) -> Result<(), ConfigError> {
    let canonicals: HashSet<&str> = plans.iter().map(|p| p.canonical).collect();
    if canonicals.len() != plans.len() {
        return Err(ConfigError::Validation(
            "duplicate canonical category".to_string(),
        ));
    }

    let mut alias_owner: HashMap<&str, &str> = HashMap::new();

    for plan in plans {
        if plan.canonical.trim().is_empty() {
            return Err(ConfigError::Validation(
                "canonical category must be non-empty".to_string(),
            ));
        }
        if plan.target == 0 {
            return Err(ConfigError::Validation(format!(
                "category '{}' has a zero target",
                plan.canonical
            )));
        }
        if plan.source_dirs.is_empty() {
            return Err(ConfigError::Validation(format!(
                "category '{}' has no source directories",
                plan.canonical
            )));
        }

        for &alias in plan.aliases {
            if alias == plan.canonical {
                return Err(ConfigError::Validation(format!(
                    "category '{}' lists its own canonical spelling as an alias",
                    plan.canonical
                )));
            }
            if canonicals.contains(alias) {
                return Err(ConfigError::Validation(format!(
                    "alias '{alias}' of '{}' is the canonical spelling of another category",
                    plan.canonical
                )));
            }
            if let Some(owner) = alias_owner.insert(alias, plan.canonical) {
                if owner != plan.canonical {
                    return Err(ConfigError::Validation(format!(
                        "alias '{alias}' is claimed by both '{owner}' and '{}'",
                        plan.canonical
                    )));
                }
            }
        }
    }

    Ok(())
}
