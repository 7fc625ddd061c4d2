use shopseed_core::StagedProducts;
use shopseed_db::{DbError, ProductStore};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct WriteSummary {
    pub(crate) inserted: usize,
    pub(crate) already_present: usize,
}

/// Insert each staged product unless one with the same name is stored.
///
/// Products are written one at a time in staged order. Existing rows are
/// never modified.
///
/// # Errors
///
/// Returns the first [`DbError`] raised by the store. Products written before
/// the failure stay committed.
pub(crate) async fn write_staged<S: ProductStore>(
    store: &S,
    staged: &StagedProducts,
) -> Result<WriteSummary, DbError> {
    let mut summary = WriteSummary::default();

    for product in staged {
        if store.insert_product_if_absent(product).await? {
            summary.inserted += 1;
        } else {
            tracing::debug!(product = %product.product_name, "already stored; left untouched");
            summary.already_present += 1;
        }
    }

    Ok(summary)
}
