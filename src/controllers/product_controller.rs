//! HTTP surface of the product resource.
//!
//! Handlers validate at the boundary and delegate to [`ProductService`];
//! body and query rejections are mapped to 400 with the standard
//! `{ "error": message }` shape instead of axum's default responses.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use crate::error::AppError;
use crate::models::{CreateProductRequest, Product, UpdateProductRequest};
use crate::repository::ProductRepository;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub limit: Option<i64>,
}

/// Build the `/products` router over the given state.
pub fn routes<R: ProductRepository>(state: AppState<R>) -> Router {
    Router::new()
        .route("/products", get(list::<R>).post(create::<R>))
        .route(
            "/products/{stock_code}",
            get(get_by_stock_code::<R>)
                .put(update::<R>)
                .delete(remove::<R>),
        )
        .with_state(state)
}

async fn list<R: ProductRepository>(
    State(state): State<AppState<R>>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Vec<Product>>, AppError> {
    let Query(params) = params.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let products = state.product_service.list(params.limit).await?;
    Ok(Json(products))
}

async fn get_by_stock_code<R: ProductRepository>(
    State(state): State<AppState<R>>,
    Path(stock_code): Path<String>,
) -> Result<Json<Product>, AppError> {
    let product = state.product_service.get(&stock_code).await?;
    Ok(Json(product))
}

async fn create<R: ProductRepository>(
    State(state): State<AppState<R>>,
    body: Result<Json<CreateProductRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Product>), AppError> {
    let Json(req) = body.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let product = state.product_service.create(req).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

async fn update<R: ProductRepository>(
    State(state): State<AppState<R>>,
    Path(stock_code): Path<String>,
    body: Result<Json<UpdateProductRequest>, JsonRejection>,
) -> Result<Json<Product>, AppError> {
    let Json(req) = body.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let product = state
        .product_service
        .update_description(&stock_code, req)
        .await?;
    Ok(Json(product))
}

async fn remove<R: ProductRepository>(
    State(state): State<AppState<R>>,
    Path(stock_code): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    state.product_service.delete(&stock_code).await?;
    Ok(Json(serde_json::json!({
        "message": format!("product '{stock_code}' deleted")
    })))
}
