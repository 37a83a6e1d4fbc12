//! Persistence seam for the product resource.
//!
//! [`ProductRepository`] is the trait the HTTP layer is generic over;
//! [`PgProductRepository`] is the production implementation on top of a
//! shared `sqlx::PgPool`. A connection is borrowed from the pool only for
//! the duration of a single statement.

use sqlx::PgPool;
use std::future::Future;

use crate::error::DataError;
use crate::models::{CreateProductRequest, Product};

const COLUMNS: &str =
    "invoice_no, stock_code, description, quantity, invoice_date, unit_price, customer_id, country";

/// Async repository for `online_retail_data`.
///
/// Uses RPITIT (return-position `impl Trait` in traits) — no `async-trait`
/// needed.
pub trait ProductRepository: Clone + Send + Sync + 'static {
    /// Fetch up to `limit` rows, persistence default order.
    fn list(&self, limit: i64) -> impl Future<Output = Result<Vec<Product>, DataError>> + Send;

    fn find_by_stock_code(
        &self,
        stock_code: &str,
    ) -> impl Future<Output = Result<Option<Product>, DataError>> + Send;

    /// Insert a new row. A duplicate `stock_code` surfaces as
    /// [`DataError::Conflict`].
    fn insert(
        &self,
        req: &CreateProductRequest,
    ) -> impl Future<Output = Result<Product, DataError>> + Send;

    /// Set the description of the row with the given key. `Ok(None)` when
    /// no row matched.
    fn update_description(
        &self,
        stock_code: &str,
        description: &str,
    ) -> impl Future<Output = Result<Option<Product>, DataError>> + Send;

    /// Remove the row with the given key. `Ok(false)` when no row matched.
    fn delete(&self, stock_code: &str) -> impl Future<Output = Result<bool, DataError>> + Send;
}

/// PostgreSQL-backed repository.
#[derive(Clone)]
pub struct PgProductRepository {
    pool: PgPool,
}

impl PgProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_sqlx(err: sqlx::Error) -> DataError {
    if let sqlx::Error::Database(ref db_err) = err {
        if db_err.is_unique_violation() {
            return DataError::Conflict;
        }
    }
    DataError::database(err)
}

impl ProductRepository for PgProductRepository {
    async fn list(&self, limit: i64) -> Result<Vec<Product>, DataError> {
        sqlx::query_as::<_, Product>(&format!(
            "SELECT {COLUMNS} FROM online_retail_data LIMIT $1"
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)
    }

    async fn find_by_stock_code(&self, stock_code: &str) -> Result<Option<Product>, DataError> {
        sqlx::query_as::<_, Product>(&format!(
            "SELECT {COLUMNS} FROM online_retail_data WHERE stock_code = $1"
        ))
        .bind(stock_code)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)
    }

    async fn insert(&self, req: &CreateProductRequest) -> Result<Product, DataError> {
        sqlx::query_as::<_, Product>(&format!(
            "INSERT INTO online_retail_data ({COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING {COLUMNS}"
        ))
        .bind(&req.invoice_no)
        .bind(&req.stock_code)
        .bind(&req.description)
        .bind(req.quantity)
        .bind(&req.invoice_date)
        .bind(req.unit_price)
        .bind(&req.customer_id)
        .bind(&req.country)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)
    }

    async fn update_description(
        &self,
        stock_code: &str,
        description: &str,
    ) -> Result<Option<Product>, DataError> {
        sqlx::query_as::<_, Product>(&format!(
            "UPDATE online_retail_data SET description = $1 \
             WHERE stock_code = $2 RETURNING {COLUMNS}"
        ))
        .bind(description)
        .bind(stock_code)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)
    }

    async fn delete(&self, stock_code: &str) -> Result<bool, DataError> {
        let result = sqlx::query("DELETE FROM online_retail_data WHERE stock_code = $1")
            .bind(stock_code)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        Ok(result.rows_affected() > 0)
    }
}
