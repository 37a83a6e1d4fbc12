use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

/// One row of `online_retail_data`. `stock_code` is the natural key; the
/// store enforces its uniqueness.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow, JsonSchema)]
pub struct Product {
    pub invoice_no: String,
    pub stock_code: String,
    pub description: Option<String>,
    pub quantity: i32,
    pub invoice_date: Option<String>,
    pub unit_price: f64,
    pub customer_id: String,
    pub country: Option<String>,
}

/// Create payload. Required fields are non-`Option`: a missing field or a
/// non-numeric `quantity`/`unit_price` fails deserialization and is
/// reported as a 400 at the boundary.
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema)]
pub struct CreateProductRequest {
    pub invoice_no: String,
    pub stock_code: String,
    pub description: String,
    pub quantity: i32,
    #[serde(default)]
    pub invoice_date: Option<String>,
    pub unit_price: f64,
    /// Accepted as a JSON string or integer; stored as text either way.
    #[serde(deserialize_with = "string_or_integer")]
    #[schemars(with = "String")]
    pub customer_id: String,
    #[serde(default)]
    pub country: Option<String>,
}

fn string_or_integer<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrInteger {
        String(String),
        Integer(i64),
    }

    Ok(match StringOrInteger::deserialize(deserializer)? {
        StringOrInteger::String(s) => s,
        StringOrInteger::Integer(n) => n.to_string(),
    })
}

/// Update payload. Only the description is mutable.
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema)]
pub struct UpdateProductRequest {
    pub description: String,
}
