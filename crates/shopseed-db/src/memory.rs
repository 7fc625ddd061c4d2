//! In-process store with the same observable semantics as [`crate::PgStore`].
//!
//! Used by the test suites and by dry runs, where the live catalog is copied
//! in and the pipeline runs without touching Postgres.

use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use shopseed_core::{NewProduct, NewUser};

use crate::store::{ProductStore, UserStore};
use crate::{DbError, ProductRow, UserRow};

/// Operations that can be made to fail on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailPoint {
    Count,
    Rewrite,
    InsertProduct,
    FindUser,
}

#[derive(Debug, Default)]
struct State {
    products: Vec<ProductRow>,
    users: Vec<UserRow>,
    next_id: i64,
    writes: usize,
    fail: Vec<FailPoint>,
}

impl State {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn check(&self, point: FailPoint) -> Result<(), DbError> {
        if self.fail.contains(&point) {
            return Err(DbError::Unavailable(format!("injected failure at {point:?}")));
        }
        Ok(())
    }

    fn push_product(&mut self, product: &NewProduct) {
        let now = Utc::now();
        let id = self.next_id();
        self.products.push(ProductRow {
            id,
            product_name: product.product_name.clone(),
            brand_name: product.brand_name.clone(),
            category: product.category.clone(),
            product_image: product.product_image.clone(),
            description: product.description.clone(),
            price: product.price,
            selling_price: product.selling_price,
            created_at: now,
            updated_at: now,
        });
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-populated with `products`. Later duplicates by name are
    /// dropped, as the unique key would.
    #[must_use]
    pub fn with_products<I>(products: I) -> Self
    where
        I: IntoIterator<Item = NewProduct>,
    {
        let store = Self::new();
        {
            let mut state = store.lock();
            for product in products {
                if !state
                    .products
                    .iter()
                    .any(|p| p.product_name == product.product_name)
                {
                    state.push_product(&product);
                }
            }
        }
        store
    }

    /// Add an existing user row directly, bypassing the write counter.
    pub fn seed_user(&self, user: &NewUser) -> i64 {
        let mut state = self.lock();
        let id = state.next_id();
        let now = Utc::now();
        state.users.push(UserRow {
            id,
            name: user.name.clone(),
            email: user.email.clone(),
            password: user.password.clone(),
            role: user.role.clone(),
            profile_pic: user.profile_pic.clone(),
            created_at: now,
            updated_at: now,
        });
        id
    }

    /// Make `point` fail with [`DbError::Unavailable`] until cleared.
    pub fn fail_on(&self, point: FailPoint) {
        self.lock().fail.push(point);
    }

    pub fn clear_failures(&self) {
        self.lock().fail.clear();
    }

    /// Number of mutating operations that changed at least one row.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.lock().writes
    }

    #[must_use]
    pub fn products(&self) -> Vec<ProductRow> {
        self.lock().products.clone()
    }

    #[must_use]
    pub fn users(&self) -> Vec<UserRow> {
        self.lock().users.clone()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ProductStore for MemoryStore {
    async fn count_products(&self) -> Result<usize, DbError> {
        let state = self.lock();
        state.check(FailPoint::Count)?;
        Ok(state.products.len())
    }

    async fn count_in_categories(&self, categories: &[&str]) -> Result<usize, DbError> {
        let state = self.lock();
        state.check(FailPoint::Count)?;
        Ok(state
            .products
            .iter()
            .filter(|p| categories.contains(&p.category.as_str()))
            .count())
    }

    async fn rewrite_categories(&self, from: &[&str], to: &str) -> Result<usize, DbError> {
        let mut state = self.lock();
        state.check(FailPoint::Rewrite)?;
        let now = Utc::now();
        let mut rewritten = 0;
        for product in &mut state.products {
            if from.contains(&product.category.as_str()) {
                product.category = to.to_string();
                product.updated_at = now;
                rewritten += 1;
            }
        }
        if rewritten > 0 {
            state.writes += 1;
        }
        Ok(rewritten)
    }

    async fn insert_product_if_absent(&self, product: &NewProduct) -> Result<bool, DbError> {
        let mut state = self.lock();
        state.check(FailPoint::InsertProduct)?;
        if state
            .products
            .iter()
            .any(|p| p.product_name == product.product_name)
        {
            return Ok(false);
        }
        state.push_product(product);
        state.writes += 1;
        Ok(true)
    }

    async fn find_product_by_name(&self, product_name: &str) -> Result<Option<ProductRow>, DbError> {
        let state = self.lock();
        Ok(state
            .products
            .iter()
            .find(|p| p.product_name == product_name)
            .cloned())
    }
}

impl UserStore for MemoryStore {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRow>, DbError> {
        let state = self.lock();
        state.check(FailPoint::FindUser)?;
        Ok(state.users.iter().find(|u| u.email == email).cloned())
    }

    async fn insert_user(&self, user: &NewUser) -> Result<i64, DbError> {
        let mut state = self.lock();
        if state.users.iter().any(|u| u.email == user.email) {
            return Err(DbError::Unavailable(format!(
                "duplicate key value violates unique constraint \"users_email_key\" ({})",
                user.email
            )));
        }
        let id = state.next_id();
        let now = Utc::now();
        state.users.push(UserRow {
            id,
            name: user.name.clone(),
            email: user.email.clone(),
            password: user.password.clone(),
            role: user.role.clone(),
            profile_pic: user.profile_pic.clone(),
            created_at: now,
            updated_at: now,
        });
        state.writes += 1;
        Ok(id)
    }

    async fn set_user_profile_pic(&self, email: &str, profile_pic: &str) -> Result<usize, DbError> {
        let mut state = self.lock();
        let now = Utc::now();
        let mut updated = 0;
        for user in state.users.iter_mut().filter(|u| u.email == email) {
            user.profile_pic = Some(profile_pic.to_string());
            user.updated_at = now;
            updated += 1;
        }
        if updated > 0 {
            state.writes += 1;
        }
        Ok(updated)
    }
}
