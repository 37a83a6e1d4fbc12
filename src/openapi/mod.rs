//! OpenAPI 3.1.0 spec generation and serving.
//!
//! The spec is derived once at startup from static route metadata plus
//! `schemars`-generated schemas for the request/response types, then served
//! as a static artifact. Request handling never touches it.

mod builder;
mod routes;

pub use builder::{build_spec, OpenApiConfig, ParamInfo, ParamLocation, RouteInfo};
pub use routes::{openapi_routes, product_route_metadata};
