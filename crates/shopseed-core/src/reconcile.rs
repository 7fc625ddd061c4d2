//! Population reconciliation: synthesize sample products until each category
//! reaches its target.
//!
//! Everything here is pure. Store counts are passed in by the caller (after
//! alias normalization), and records produced earlier in the same run are
//! threaded through an explicit [`StagedProducts`] accumulator so later
//! categories see them.

use std::collections::HashSet;

use rand::Rng;

use crate::catalog::{derive_label, CategoryPlan};
use crate::inventory::Inventory;
use crate::products::NewProduct;
use crate::urls::image_url;

const PRICE_MIN: i32 = 1_000;
const PRICE_MAX_EXCLUSIVE: i32 = 91_000;
const DISCOUNT_MIN: f64 = 0.6;
const DISCOUNT_MAX_EXCLUSIVE: f64 = 0.9;

/// Products synthesized during one run, in staging order. Product names are
/// unique within the list.
#[derive(Debug, Clone, Default)]
pub struct StagedProducts {
    products: Vec<NewProduct>,
    names: HashSet<String>,
}

impl StagedProducts {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    #[must_use]
    pub fn count_in_category(&self, category: &str) -> usize {
        self.products
            .iter()
            .filter(|p| p.category == category)
            .count()
    }

    #[must_use]
    pub fn contains_name(&self, product_name: &str) -> bool {
        self.names.contains(product_name)
    }

    /// Append `product`. Returns `false`, leaving the list unchanged, when a
    /// product with the same name is already staged.
    pub fn push(&mut self, product: NewProduct) -> bool {
        if !self.names.insert(product.product_name.clone()) {
            return false;
        }
        self.products.push(product);
        true
    }

    pub fn iter(&self) -> std::slice::Iter<'_, NewProduct> {
        self.products.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[NewProduct] {
        &self.products
    }
}

impl<'a> IntoIterator for &'a StagedProducts {
    type Item = &'a NewProduct;
    type IntoIter = std::slice::Iter<'a, NewProduct>;

    fn into_iter(self) -> Self::IntoIter {
        self.products.iter()
    }
}

/// Result of reconciling one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// Store plus staged records already meet the target.
    AlreadySatisfied { existing: usize },
    /// The category is short but its source directory has no images.
    NoImages { existing: usize, needed: usize },
    /// `added` records were staged; `duplicates` candidates were dropped
    /// because their name was already staged.
    Staged {
        existing: usize,
        added: usize,
        duplicates: usize,
    },
}

/// Random base price and discounted selling price.
#[allow(clippy::cast_possible_truncation)]
fn sample_prices<R: Rng>(rng: &mut R) -> (i32, i32) {
    let price = rng.random_range(PRICE_MIN..PRICE_MAX_EXCLUSIVE);
    let factor = rng.random_range(DISCOUNT_MIN..DISCOUNT_MAX_EXCLUSIVE);
    let selling = (f64::from(price) * factor).floor() as i32;
    (price, selling)
}

/// Top up `plan.canonical` to `plan.target` records.
///
/// `store_count` is the number of records already stored under the canonical
/// spelling. Synthesized names carry a running index starting after
/// `store_count` plus the records already staged for this category, and
/// images cycle through `files` in order.
pub fn reconcile_category<R: Rng>(
    plan: &CategoryPlan,
    source_dir: &str,
    files: &[String],
    store_count: usize,
    staged: &mut StagedProducts,
    base_url: &str,
    rng: &mut R,
) -> ReconcileOutcome {
    let existing = store_count + staged.count_in_category(plan.canonical);
    if existing >= plan.target {
        return ReconcileOutcome::AlreadySatisfied { existing };
    }

    let needed = plan.target - existing;
    if files.is_empty() {
        return ReconcileOutcome::NoImages { existing, needed };
    }

    let mut added = 0;
    let mut duplicates = 0;
    for i in 0..needed {
        let file = &files[i % files.len()];
        let product_name = format!("{} {}", plan.naming.label_for(file), existing + i + 1);
        let (price, selling_price) = sample_prices(rng);

        let product = NewProduct {
            description: plan.describe(&product_name),
            product_name,
            brand_name: plan.brand.to_string(),
            category: plan.canonical.to_string(),
            product_image: vec![image_url(base_url, source_dir, file)],
            price,
            selling_price,
        };

        if staged.push(product) {
            added += 1;
        } else {
            duplicates += 1;
        }
    }

    ReconcileOutcome::Staged {
        existing,
        added,
        duplicates,
    }
}

/// Stage one generic record per image for every inventory directory that no
/// plan owns, using the raw directory name as the category. Stops once the
/// staged list holds `cap` records. Returns the number of records added.
///
/// Files whose name yields an empty label, or whose label is already staged,
/// are skipped.
pub fn sweep_general<R: Rng>(
    inventory: &Inventory,
    plans: &[CategoryPlan],
    cap: usize,
    staged: &mut StagedProducts,
    base_url: &str,
    rng: &mut R,
) -> usize {
    let mut added = 0;

    'dirs: for (dir, files) in inventory.directories() {
        if plans.iter().any(|p| p.owns_directory(dir)) {
            continue;
        }
        let brand_name = capitalize(dir);

        for file in files {
            if staged.len() >= cap {
                break 'dirs;
            }

            let product_name = derive_label(file);
            if product_name.is_empty() || staged.contains_name(&product_name) {
                continue;
            }
            let (price, selling_price) = sample_prices(rng);

            let product = NewProduct {
                description: format!("Sample {dir} - {product_name}"),
                product_name,
                brand_name: brand_name.clone(),
                category: dir.to_string(),
                product_image: vec![image_url(base_url, dir, file)],
                price,
                selling_price,
            };
            if staged.push(product) {
                added += 1;
            }
        }
    }

    added
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
#[path = "reconcile_test.rs"]
mod tests;
