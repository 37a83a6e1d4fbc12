use serde_json::{json, Map, Value};

/// Where a parameter lives in the request.
#[derive(Clone, Copy, Debug)]
pub enum ParamLocation {
    Path,
    Query,
}

#[derive(Clone, Debug)]
pub struct ParamInfo {
    pub name: &'static str,
    pub location: ParamLocation,
    pub required: bool,
    /// OpenAPI scalar type, e.g. `"string"` or `"integer"`.
    pub param_type: &'static str,
    pub description: Option<&'static str>,
}

/// Static description of one route, the unit the spec is built from.
#[derive(Clone, Debug)]
pub struct RouteInfo {
    pub method: &'static str,
    pub path: &'static str,
    pub operation_id: &'static str,
    pub summary: &'static str,
    pub tag: &'static str,
    pub params: Vec<ParamInfo>,
    pub request_body_type: Option<&'static str>,
    pub request_body_schema: Option<Value>,
    pub response_status: u16,
    /// Schema name of the success body; `None` renders a plain description.
    pub response_type: Option<&'static str>,
    pub response_schema: Option<Value>,
    /// When set, the success body is an array of `response_type`.
    pub response_is_array: bool,
    /// Additional `(status, description)` error responses.
    pub error_responses: Vec<(u16, &'static str)>,
}

/// Configuration for the generated OpenAPI specification.
pub struct OpenApiConfig {
    pub title: String,
    pub version: String,
    pub description: Option<String>,
    pub docs_ui: bool,
}

impl OpenApiConfig {
    pub fn new(title: &str, version: &str) -> Self {
        Self {
            title: title.to_string(),
            version: version.to_string(),
            description: None,
            docs_ui: false,
        }
    }

    pub fn with_description(mut self, desc: &str) -> Self {
        self.description = Some(desc.to_string());
        self
    }

    pub fn with_docs_ui(mut self, enabled: bool) -> Self {
        self.docs_ui = enabled;
        self
    }
}

/// Recursively rewrite `$ref` paths from schemars format to OpenAPI
/// components format.
///
/// schemars 1.x generates JSON Schema Draft 2020-12 using `$defs` and
/// `$ref: "#/$defs/X"`. OpenAPI 3.1.0 expects schemas under
/// `#/components/schemas/X`.
fn sanitize_schema(value: &mut Value) {
    match value {
        Value::Object(obj) => {
            if let Some(Value::String(ref_str)) = obj.get_mut("$ref") {
                if ref_str.starts_with("#/$defs/") {
                    *ref_str = ref_str.replace("#/$defs/", "#/components/schemas/");
                }
            }
            for (_, v) in obj.iter_mut() {
                sanitize_schema(v);
            }
        }
        Value::Array(arr) => {
            for v in arr.iter_mut() {
                sanitize_schema(v);
            }
        }
        _ => {}
    }
}

/// Insert a schema into the schemas map, promoting `$defs` to top-level
/// components.
fn insert_schema(
    schemas: &mut Map<String, Value>,
    extra_definitions: &mut Vec<(String, Value)>,
    type_name: &str,
    root_schema: &Option<Value>,
) {
    if let Some(root) = root_schema {
        let mut schema = root.clone();
        if let Some(obj) = schema.as_object_mut() {
            obj.remove("$schema");
            if let Some(Value::Object(defs)) = obj.remove("$defs") {
                for (def_name, def_schema) in defs {
                    extra_definitions.push((def_name, def_schema));
                }
            }
        }
        sanitize_schema(&mut schema);
        schemas.insert(type_name.to_string(), schema);
    } else {
        schemas.insert(type_name.to_string(), json!({ "type": "object" }));
    }
}

fn status_description(status: u16) -> &'static str {
    match status {
        200 => "Successful response",
        201 => "Created",
        204 => "No content",
        400 => "Invalid request",
        404 => "Not found",
        500 => "Internal server error",
        _ => "Response",
    }
}

/// Build an OpenAPI 3.1.0 JSON spec from config and route metadata.
pub fn build_spec(config: &OpenApiConfig, routes: &[RouteInfo]) -> Value {
    let mut paths: Map<String, Value> = Map::new();

    for route in routes {
        let method_lower = route.method.to_lowercase();

        let mut operation: Map<String, Value> = Map::new();
        operation.insert("operationId".into(), json!(route.operation_id));
        operation.insert("tags".into(), json!([route.tag]));
        operation.insert("summary".into(), json!(route.summary));

        let params: Vec<Value> = route
            .params
            .iter()
            .map(|p| {
                let location = match p.location {
                    ParamLocation::Path => "path",
                    ParamLocation::Query => "query",
                };
                let mut param = json!({
                    "name": p.name,
                    "in": location,
                    "required": p.required,
                    "schema": { "type": p.param_type }
                });
                if let (Some(desc), Some(obj)) = (p.description, param.as_object_mut()) {
                    obj.insert("description".into(), json!(desc));
                }
                param
            })
            .collect();

        if !params.is_empty() {
            operation.insert("parameters".into(), json!(params));
        }

        if let Some(body_type) = route.request_body_type {
            operation.insert(
                "requestBody".into(),
                json!({
                    "required": true,
                    "content": {
                        "application/json": {
                            "schema": { "$ref": format!("#/components/schemas/{body_type}") }
                        }
                    }
                }),
            );
        }

        let mut responses: Map<String, Value> = Map::new();
        let status_key = route.response_status.to_string();
        let status_desc = status_description(route.response_status);

        if let Some(resp_type) = route.response_type {
            let item_schema = json!({ "$ref": format!("#/components/schemas/{resp_type}") });
            let schema = if route.response_is_array {
                json!({ "type": "array", "items": item_schema })
            } else {
                item_schema
            };
            responses.insert(
                status_key,
                json!({
                    "description": status_desc,
                    "content": { "application/json": { "schema": schema } }
                }),
            );
        } else {
            responses.insert(status_key, json!({ "description": status_desc }));
        }

        for (status, desc) in &route.error_responses {
            responses.insert(status.to_string(), json!({ "description": desc }));
        }

        operation.insert("responses".into(), Value::Object(responses));

        let path_entry = paths.entry(route.path.to_string()).or_insert_with(|| json!({}));
        if let Some(obj) = path_entry.as_object_mut() {
            obj.insert(method_lower, Value::Object(operation));
        }
    }

    let mut info: Map<String, Value> = Map::new();
    info.insert("title".into(), json!(config.title));
    info.insert("version".into(), json!(config.version));
    if let Some(ref desc) = config.description {
        info.insert("description".into(), json!(desc));
    }

    // Collect all referenced types (request body + response) into
    // components/schemas. schemars 1.x generates Draft 2020-12 (aligned with
    // OpenAPI 3.1.0): strip `$schema`, promote `$defs` entries, and rewrite
    // `$ref` paths.
    let mut schemas: Map<String, Value> = Map::new();
    let mut extra_definitions: Vec<(String, Value)> = Vec::new();

    for route in routes {
        if let Some(body_type) = route.request_body_type {
            if !schemas.contains_key(body_type) {
                insert_schema(
                    &mut schemas,
                    &mut extra_definitions,
                    body_type,
                    &route.request_body_schema,
                );
            }
        }
        if let Some(resp_type) = route.response_type {
            if !schemas.contains_key(resp_type) {
                insert_schema(
                    &mut schemas,
                    &mut extra_definitions,
                    resp_type,
                    &route.response_schema,
                );
            }
        }
    }

    for (def_name, mut def_schema) in extra_definitions {
        sanitize_schema(&mut def_schema);
        schemas.entry(def_name).or_insert(def_schema);
    }

    let mut components: Map<String, Value> = Map::new();
    if !schemas.is_empty() {
        components.insert("schemas".into(), Value::Object(schemas));
    }

    json!({
        "openapi": "3.1.0",
        "info": info,
        "paths": paths,
        "components": components
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(path: &'static str, method: &'static str) -> RouteInfo {
        RouteInfo {
            method,
            path,
            operation_id: "op",
            summary: "summary",
            tag: "products",
            params: vec![],
            request_body_type: None,
            request_body_schema: None,
            response_status: 200,
            response_type: None,
            response_schema: None,
            response_is_array: false,
            error_responses: vec![],
        }
    }

    #[test]
    fn spec_groups_methods_under_one_path() {
        let config = OpenApiConfig::new("Test", "1.0.0");
        let spec = build_spec(
            &config,
            &[route("/products", "GET"), route("/products", "POST")],
        );
        let entry = &spec["paths"]["/products"];
        assert!(entry.get("get").is_some());
        assert!(entry.get("post").is_some());
    }

    #[test]
    fn refs_are_rewritten_to_components() {
        let mut schema = json!({
            "$schema": "https://json-schema.org/draft/2020-12/schema",
            "type": "object",
            "properties": { "nested": { "$ref": "#/$defs/Nested" } },
            "$defs": { "Nested": { "type": "string" } }
        });
        let config = OpenApiConfig::new("Test", "1.0.0");
        let mut r = route("/things", "POST");
        r.request_body_type = Some("Thing");
        r.request_body_schema = Some(schema.take());
        let spec = build_spec(&config, &[r]);

        let thing = &spec["components"]["schemas"]["Thing"];
        assert!(thing.get("$schema").is_none());
        assert_eq!(
            thing["properties"]["nested"]["$ref"],
            "#/components/schemas/Nested"
        );
        assert_eq!(spec["components"]["schemas"]["Nested"]["type"], "string");
    }

    #[test]
    fn array_responses_use_items_ref() {
        let config = OpenApiConfig::new("Test", "1.0.0");
        let mut r = route("/products", "GET");
        r.response_type = Some("Product");
        r.response_is_array = true;
        let spec = build_spec(&config, &[r]);
        let schema =
            &spec["paths"]["/products"]["get"]["responses"]["200"]["content"]["application/json"]["schema"];
        assert_eq!(schema["type"], "array");
        assert_eq!(schema["items"]["$ref"], "#/components/schemas/Product");
    }
}
