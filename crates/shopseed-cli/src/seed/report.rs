use shopseed_core::CategoryPlan;
use shopseed_db::{DbError, ProductStore};

/// Stored product counts for one product line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CategoryCount {
    pub(crate) canonical: &'static str,
    pub(crate) target: usize,
    pub(crate) count: usize,
    /// Aliases that still have products filed under them.
    pub(crate) strays: Vec<(&'static str, usize)>,
}

pub(crate) async fn category_report<S: ProductStore>(
    store: &S,
    plans: &[CategoryPlan],
) -> Result<Vec<CategoryCount>, DbError> {
    let mut rows = Vec::with_capacity(plans.len());
    for plan in plans {
        let count = store.count_in_categories(&[plan.canonical]).await?;
        let mut strays = Vec::new();
        for alias in plan.aliases {
            let n = store.count_in_categories(&[*alias]).await?;
            if n > 0 {
                strays.push((*alias, n));
            }
        }
        rows.push(CategoryCount {
            canonical: plan.canonical,
            target: plan.target,
            count,
            strays,
        });
    }
    Ok(rows)
}

pub(crate) fn render_report(rows: &[CategoryCount], total: usize) -> String {
    let mut out = format!("final category counts ({total} products stored):\n");
    for row in rows {
        out.push_str(&format!(
            "  {:<20} {:>4} / {}",
            row.canonical, row.count, row.target
        ));
        if !row.strays.is_empty() {
            let strays: Vec<String> = row
                .strays
                .iter()
                .map(|(alias, n)| format!("{alias}={n}"))
                .collect();
            out.push_str(&format!("  (unnormalized: {})", strays.join(", ")));
        }
        out.push('\n');
    }
    out
}

/// Print the per-category summary to stdout.
pub(crate) async fn print_report<S: ProductStore>(
    store: &S,
    plans: &[CategoryPlan],
) -> Result<(), DbError> {
    let rows = category_report(store, plans).await?;
    let total = store.count_products().await?;
    print!("{}", render_report(&rows, total));
    Ok(())
}
