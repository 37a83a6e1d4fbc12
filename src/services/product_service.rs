use crate::error::{AppError, DataError};
use crate::models::{CreateProductRequest, Product, UpdateProductRequest};
use crate::repository::ProductRepository;

pub const DEFAULT_LIMIT: i64 = 100;
pub const MAX_LIMIT: i64 = 1000;

/// Domain layer for the product resource. Maps repository outcomes to
/// HTTP-level errors; holds no state of its own beyond the repository.
#[derive(Clone)]
pub struct ProductService<R> {
    repo: R,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// List products. `limit` defaults to 100 and is clamped to 1..=1000.
    pub async fn list(&self, limit: Option<i64>) -> Result<Vec<Product>, AppError> {
        let limit = limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        Ok(self.repo.list(limit).await?)
    }

    pub async fn get(&self, stock_code: &str) -> Result<Product, AppError> {
        self.repo
            .find_by_stock_code(stock_code)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("product '{stock_code}' not found")))
    }

    pub async fn create(&self, req: CreateProductRequest) -> Result<Product, AppError> {
        match self.repo.insert(&req).await {
            Ok(product) => Ok(product),
            Err(DataError::Conflict) => Err(AppError::Conflict(format!(
                "product '{}' already exists",
                req.stock_code
            ))),
            Err(other) => Err(other.into()),
        }
    }

    pub async fn update_description(
        &self,
        stock_code: &str,
        req: UpdateProductRequest,
    ) -> Result<Product, AppError> {
        self.repo
            .update_description(stock_code, &req.description)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("product '{stock_code}' not found")))
    }

    pub async fn delete(&self, stock_code: &str) -> Result<(), AppError> {
        let removed = self.repo.delete(stock_code).await?;
        if removed {
            Ok(())
        } else {
            Err(AppError::NotFound(format!(
                "product '{stock_code}' not found"
            )))
        }
    }
}
