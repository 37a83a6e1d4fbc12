//! Retail API - a CRUD service over the `online_retail_data` table.
//!
//! The functional core is a resource router mapping HTTP verbs to
//! parameterized SQL against a single table, plus an OpenAPI description
//! generated at startup and served at `/openapi.json` / `/api-docs`.
//!
//! Layering: controller → service → repository. The repository is a trait
//! seam so the HTTP surface can be exercised without a live database.

pub mod config;
pub mod controllers;
pub mod error;
pub mod layers;
pub mod models;
pub mod openapi;
pub mod repository;
pub mod services;
pub mod state;

use axum::routing::get;
use axum::{Json, Router};

use crate::openapi::{openapi_routes, product_route_metadata, OpenApiConfig};
use crate::repository::ProductRepository;
use crate::state::AppState;

pub use crate::layers::init_tracing;

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "UP" }))
}

/// Assemble the full application router: product resource, OpenAPI docs,
/// health probe, request tracing, and permissive CORS.
pub fn app_router<R: ProductRepository>(state: AppState<R>, openapi: OpenApiConfig) -> Router {
    Router::new()
        .merge(controllers::product_controller::routes(state))
        .merge(openapi_routes(openapi, product_route_metadata()))
        .route("/health", get(health))
        .layer(layers::default_trace())
        .layer(layers::default_cors())
}

/// The OpenAPI document config used by the binary and the tests.
pub fn default_openapi_config() -> OpenApiConfig {
    OpenApiConfig::new("Online Retail API", "1.0.0")
        .with_description("A simple CRUD API for online retail data")
        .with_docs_ui(true)
}
