//! Database operations for `products`.

use chrono::{DateTime, Utc};
use shopseed_core::NewProduct;

use crate::store::{PgStore, ProductStore};
use crate::{count_to_usize, DbError};

/// A row from the `products` table.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct ProductRow {
    pub id: i64,
    pub product_name: String,
    pub brand_name: String,
    pub category: String,
    pub product_image: Vec<String>,
    pub description: String,
    pub price: i32,
    pub selling_price: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProductRow {
    /// The row's fields as a [`NewProduct`], dropping id and timestamps.
    #[must_use]
    pub fn to_new_product(&self) -> NewProduct {
        NewProduct {
            product_name: self.product_name.clone(),
            brand_name: self.brand_name.clone(),
            category: self.category.clone(),
            product_image: self.product_image.clone(),
            description: self.description.clone(),
            price: self.price,
            selling_price: self.selling_price,
        }
    }
}

const PRODUCT_COLUMNS: &str = "id, product_name, brand_name, category, product_image, \
     description, price, selling_price, created_at, updated_at";

impl PgStore {
    /// Every product, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Sqlx`] if the query fails.
    pub async fn list_products(&self) -> Result<Vec<ProductRow>, DbError> {
        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY id"
        ))
        .fetch_all(self.pool())
        .await?;
        Ok(rows)
    }
}

impl ProductStore for PgStore {
    async fn count_products(&self) -> Result<usize, DbError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(self.pool())
            .await?;
        Ok(count_to_usize(count))
    }

    async fn count_in_categories(&self, categories: &[&str]) -> Result<usize, DbError> {
        if categories.is_empty() {
            return Ok(0);
        }
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE category = ANY($1)")
                .bind(categories)
                .fetch_one(self.pool())
                .await?;
        Ok(count_to_usize(count))
    }

    async fn rewrite_categories(&self, from: &[&str], to: &str) -> Result<usize, DbError> {
        if from.is_empty() {
            return Ok(0);
        }
        let result = sqlx::query(
            "UPDATE products SET category = $1, updated_at = NOW() \
             WHERE category = ANY($2)",
        )
        .bind(to)
        .bind(from)
        .execute(self.pool())
        .await?;
        Ok(usize::try_from(result.rows_affected()).unwrap_or(usize::MAX))
    }

    async fn insert_product_if_absent(&self, product: &NewProduct) -> Result<bool, DbError> {
        let result = sqlx::query(
            "INSERT INTO products \
                 (product_name, brand_name, category, product_image, description, \
                  price, selling_price) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             ON CONFLICT (product_name) DO NOTHING",
        )
        .bind(&product.product_name)
        .bind(&product.brand_name)
        .bind(&product.category)
        .bind(&product.product_image)
        .bind(&product.description)
        .bind(product.price)
        .bind(product.selling_price)
        .execute(self.pool())
        .await?;
        Ok(result.rows_affected() == 1)
    }

    async fn find_product_by_name(&self, product_name: &str) -> Result<Option<ProductRow>, DbError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE product_name = $1"
        ))
        .bind(product_name)
        .fetch_optional(self.pool())
        .await?;
        Ok(row)
    }
}
