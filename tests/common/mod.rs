#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::Router;
use http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use tokio::sync::RwLock;
use tower::ServiceExt;

use retail_api::error::DataError;
use retail_api::models::{CreateProductRequest, Product};
use retail_api::repository::ProductRepository;
use retail_api::state::AppState;

/// In-memory repository double. Enforces the `stock_code` uniqueness
/// invariant the way the real store's constraint does.
#[derive(Clone, Default)]
pub struct InMemoryProductRepository {
    rows: Arc<RwLock<Vec<Product>>>,
    fail: bool,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// A repository whose every call fails, to exercise the 500 path.
    pub fn failing() -> Self {
        Self {
            rows: Arc::new(RwLock::new(Vec::new())),
            fail: true,
        }
    }

    pub async fn seed(&self, products: Vec<Product>) {
        self.rows.write().await.extend(products);
    }

    pub async fn snapshot(&self) -> Vec<Product> {
        self.rows.read().await.clone()
    }

    fn check(&self) -> Result<(), DataError> {
        if self.fail {
            Err(DataError::database(std::io::Error::other(
                "connection refused",
            )))
        } else {
            Ok(())
        }
    }
}

impl ProductRepository for InMemoryProductRepository {
    async fn list(&self, limit: i64) -> Result<Vec<Product>, DataError> {
        self.check()?;
        let rows = self.rows.read().await;
        Ok(rows.iter().take(limit as usize).cloned().collect())
    }

    async fn find_by_stock_code(&self, stock_code: &str) -> Result<Option<Product>, DataError> {
        self.check()?;
        let rows = self.rows.read().await;
        Ok(rows.iter().find(|p| p.stock_code == stock_code).cloned())
    }

    async fn insert(&self, req: &CreateProductRequest) -> Result<Product, DataError> {
        self.check()?;
        let mut rows = self.rows.write().await;
        if rows.iter().any(|p| p.stock_code == req.stock_code) {
            return Err(DataError::Conflict);
        }
        let product = Product {
            invoice_no: req.invoice_no.clone(),
            stock_code: req.stock_code.clone(),
            description: Some(req.description.clone()),
            quantity: req.quantity,
            invoice_date: req.invoice_date.clone(),
            unit_price: req.unit_price,
            customer_id: req.customer_id.clone(),
            country: req.country.clone(),
        };
        rows.push(product.clone());
        Ok(product)
    }

    async fn update_description(
        &self,
        stock_code: &str,
        description: &str,
    ) -> Result<Option<Product>, DataError> {
        self.check()?;
        let mut rows = self.rows.write().await;
        match rows.iter_mut().find(|p| p.stock_code == stock_code) {
            Some(row) => {
                row.description = Some(description.to_string());
                Ok(Some(row.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, stock_code: &str) -> Result<bool, DataError> {
        self.check()?;
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|p| p.stock_code != stock_code);
        Ok(rows.len() < before)
    }
}

pub fn test_app(repo: InMemoryProductRepository) -> Router {
    retail_api::app_router(AppState::new(repo), retail_api::default_openapi_config())
}

pub fn product(stock_code: &str) -> Product {
    Product {
        invoice_no: "536365".to_string(),
        stock_code: stock_code.to_string(),
        description: Some("WHITE HANGING HEART T-LIGHT HOLDER".to_string()),
        quantity: 6,
        invoice_date: Some("2010-12-01 08:26:00".to_string()),
        unit_price: 2.55,
        customer_id: "17850".to_string(),
        country: Some("United Kingdom".to_string()),
    }
}

pub async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(req).await.expect("request failed");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body read failed")
        .to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

pub fn get(path: &str) -> Request<Body> {
    Request::builder()
        .uri(path)
        .body(Body::empty())
        .expect("request build failed")
}

pub fn json_request(method: &str, path: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(path)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request build failed")
}

pub fn delete(path: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(path)
        .body(Body::empty())
        .expect("request build failed")
}
