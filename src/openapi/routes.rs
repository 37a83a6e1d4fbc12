use axum::response::{Html, IntoResponse};
use axum::routing::get;
use axum::Router;
use serde_json::Value;
use std::sync::Arc;

use crate::models::{CreateProductRequest, Product, UpdateProductRequest};
use crate::openapi::builder::{
    build_spec, OpenApiConfig, ParamInfo, ParamLocation, RouteInfo,
};

fn schema_of<T: schemars::JsonSchema>() -> Option<Value> {
    serde_json::to_value(schemars::schema_for!(T)).ok()
}

fn stock_code_param() -> ParamInfo {
    ParamInfo {
        name: "stock_code",
        location: ParamLocation::Path,
        required: true,
        param_type: "string",
        description: Some("Natural key of the product"),
    }
}

/// Route metadata for the five product operations.
pub fn product_route_metadata() -> Vec<RouteInfo> {
    vec![
        RouteInfo {
            method: "GET",
            path: "/products",
            operation_id: "listProducts",
            summary: "List products",
            tag: "products",
            params: vec![ParamInfo {
                name: "limit",
                location: ParamLocation::Query,
                required: false,
                param_type: "integer",
                description: Some("Maximum rows to return (default 100, capped at 1000)"),
            }],
            request_body_type: None,
            request_body_schema: None,
            response_status: 200,
            response_type: Some("Product"),
            response_schema: schema_of::<Product>(),
            response_is_array: true,
            error_responses: vec![(500, "Internal server error")],
        },
        RouteInfo {
            method: "GET",
            path: "/products/{stock_code}",
            operation_id: "getProduct",
            summary: "Get a product by stock_code",
            tag: "products",
            params: vec![stock_code_param()],
            request_body_type: None,
            request_body_schema: None,
            response_status: 200,
            response_type: Some("Product"),
            response_schema: schema_of::<Product>(),
            response_is_array: false,
            error_responses: vec![(404, "Not found"), (500, "Internal server error")],
        },
        RouteInfo {
            method: "POST",
            path: "/products",
            operation_id: "createProduct",
            summary: "Add a new product",
            tag: "products",
            params: vec![],
            request_body_type: Some("CreateProductRequest"),
            request_body_schema: schema_of::<CreateProductRequest>(),
            response_status: 201,
            response_type: Some("Product"),
            response_schema: schema_of::<Product>(),
            response_is_array: false,
            error_responses: vec![
                (400, "Invalid payload or stock_code already exists"),
                (500, "Internal server error"),
            ],
        },
        RouteInfo {
            method: "PUT",
            path: "/products/{stock_code}",
            operation_id: "updateProduct",
            summary: "Update a product description",
            tag: "products",
            params: vec![stock_code_param()],
            request_body_type: Some("UpdateProductRequest"),
            request_body_schema: schema_of::<UpdateProductRequest>(),
            response_status: 200,
            response_type: Some("Product"),
            response_schema: schema_of::<Product>(),
            response_is_array: false,
            error_responses: vec![
                (400, "Invalid payload"),
                (404, "Not found"),
                (500, "Internal server error"),
            ],
        },
        RouteInfo {
            method: "DELETE",
            path: "/products/{stock_code}",
            operation_id: "deleteProduct",
            summary: "Delete a product",
            tag: "products",
            params: vec![stock_code_param()],
            request_body_type: None,
            request_body_schema: None,
            response_status: 200,
            response_type: None,
            response_schema: None,
            response_is_array: false,
            error_responses: vec![(404, "Not found"), (500, "Internal server error")],
        },
    ]
}

struct OpenApiState {
    spec_json: String,
}

/// Build a router that serves `/openapi.json` and, when `docs_ui` is
/// enabled, the Swagger UI page at `/api-docs`. The spec is rendered once,
/// here, and served as a static artifact.
pub fn openapi_routes(config: OpenApiConfig, route_metadata: Vec<RouteInfo>) -> Router {
    let spec = build_spec(&config, &route_metadata);
    let spec_json = serde_json::to_string_pretty(&spec).unwrap_or_else(|_| "{}".to_string());
    let docs_ui = config.docs_ui;

    let state = Arc::new(OpenApiState { spec_json });

    let mut router = Router::new().route(
        "/openapi.json",
        get(move || {
            let json = state.spec_json.clone();
            async move { ([("content-type", "application/json")], json).into_response() }
        }),
    );

    if docs_ui {
        router = router.route(
            "/api-docs",
            get(|| async { Html(SWAGGER_UI_HTML).into_response() }),
        );
    }

    router
}

const SWAGGER_UI_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Online Retail API</title>
    <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css">
</head>
<body>
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
    <script>
        window.onload = () => {
            SwaggerUIBundle({
                url: "/openapi.json",
                dom_id: "#swagger-ui",
            });
        };
    </script>
</body>
</html>"##;
