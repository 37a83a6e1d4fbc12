mod common;

use http::StatusCode;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use common::{get, send, test_app, InMemoryProductRepository};

async fn fetch_spec() -> Value {
    let (status, spec) = send(
        test_app(InMemoryProductRepository::new()),
        get("/openapi.json"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    spec
}

#[tokio::test]
async fn openapi_json_is_served_with_json_content_type() {
    let app = test_app(InMemoryProductRepository::new());
    let response = app.oneshot(get("/openapi.json")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("content-type")
            .unwrap()
            .to_str()
            .unwrap(),
        "application/json"
    );
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let spec: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(spec["openapi"], "3.1.0");
}

#[tokio::test]
async fn spec_declares_all_five_product_operations() {
    let spec = fetch_spec().await;
    let paths = spec["paths"].as_object().unwrap();

    assert!(spec["paths"]["/products"]["get"].is_object());
    assert!(spec["paths"]["/products"]["post"].is_object());
    assert!(paths.contains_key("/products/{stock_code}"));
    let by_key = &spec["paths"]["/products/{stock_code}"];
    assert!(by_key["get"].is_object());
    assert!(by_key["put"].is_object());
    assert!(by_key["delete"].is_object());
}

#[tokio::test]
async fn spec_contains_dto_schemas() {
    let spec = fetch_spec().await;
    let schemas = spec["components"]["schemas"].as_object().unwrap();
    assert!(schemas.contains_key("Product"));
    assert!(schemas.contains_key("CreateProductRequest"));
    assert!(schemas.contains_key("UpdateProductRequest"));

    // The entity schema lists the natural key.
    let product_props = spec["components"]["schemas"]["Product"]["properties"]
        .as_object()
        .unwrap();
    assert!(product_props.contains_key("stock_code"));
    assert!(product_props.contains_key("unit_price"));
}

#[tokio::test]
async fn spec_declares_error_responses() {
    let spec = fetch_spec().await;
    let post = &spec["paths"]["/products"]["post"];
    assert!(post["responses"]["201"].is_object());
    assert!(post["responses"]["400"].is_object());
    assert!(post["responses"]["500"].is_object());

    let delete = &spec["paths"]["/products/{stock_code}"]["delete"];
    assert!(delete["responses"]["200"].is_object());
    assert!(delete["responses"]["404"].is_object());
}

#[tokio::test]
async fn api_docs_serves_swagger_ui() {
    let app = test_app(InMemoryProductRepository::new());
    let response = app.oneshot(get("/api-docs")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("<html"));
    assert!(html.contains("SwaggerUIBundle"));
    assert!(html.contains("/openapi.json"));
}
