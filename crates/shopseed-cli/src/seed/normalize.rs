use shopseed_core::CategoryPlan;
use shopseed_db::{DbError, ProductStore};

/// Rewrite every product filed under one of `plan`'s aliases to the
/// canonical spelling. Returns the number of products moved.
///
/// The store is only written to when at least one alias match exists, so a
/// second call on an already-normalized store performs no write.
///
/// # Errors
///
/// Returns [`DbError`] if the count or the bulk update fails.
pub(crate) async fn normalize_category<S: ProductStore>(
    store: &S,
    plan: &CategoryPlan,
) -> Result<usize, DbError> {
    if plan.aliases.is_empty() {
        return Ok(0);
    }

    let strays = store.count_in_categories(plan.aliases).await?;
    if strays == 0 {
        return Ok(0);
    }

    let rewritten = store
        .rewrite_categories(plan.aliases, plan.canonical)
        .await?;
    tracing::info!(
        category = plan.canonical,
        rewritten,
        "normalized alias categories"
    );
    Ok(rewritten)
}
