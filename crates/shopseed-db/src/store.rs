//! Store ports consumed by the seeding pipeline.
//!
//! The pipeline only ever needs counting, bulk category rewrites, single-row
//! lookups, and insert-if-absent writes. [`PgStore`] backs these with
//! Postgres; [`crate::MemoryStore`] backs them in-process.

use std::future::Future;

use shopseed_core::{NewProduct, NewUser};
use sqlx::PgPool;

use crate::{DbError, ProductRow, UserRow};

pub trait ProductStore {
    /// Total number of products.
    fn count_products(&self) -> impl Future<Output = Result<usize, DbError>> + Send;

    /// Number of products whose category is any of `categories`.
    fn count_in_categories(
        &self,
        categories: &[&str],
    ) -> impl Future<Output = Result<usize, DbError>> + Send;

    /// Set `category = to` on every product whose category is any of `from`.
    /// Returns the number of rows rewritten.
    fn rewrite_categories(
        &self,
        from: &[&str],
        to: &str,
    ) -> impl Future<Output = Result<usize, DbError>> + Send;

    /// Insert `product` unless a product with the same name exists, in which
    /// case nothing is modified. Returns `true` if a row was inserted.
    fn insert_product_if_absent(
        &self,
        product: &NewProduct,
    ) -> impl Future<Output = Result<bool, DbError>> + Send;

    fn find_product_by_name(
        &self,
        product_name: &str,
    ) -> impl Future<Output = Result<Option<ProductRow>, DbError>> + Send;
}

pub trait UserStore {
    fn find_user_by_email(
        &self,
        email: &str,
    ) -> impl Future<Output = Result<Option<UserRow>, DbError>> + Send;

    /// Insert a new user and return its id.
    fn insert_user(&self, user: &NewUser) -> impl Future<Output = Result<i64, DbError>> + Send;

    /// Set `profile_pic` on the user with `email`, touching no other field.
    /// Returns the number of rows updated.
    fn set_user_profile_pic(
        &self,
        email: &str,
        profile_pic: &str,
    ) -> impl Future<Output = Result<usize, DbError>> + Send;
}

/// Postgres-backed store.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}
