//! Request validation helpers shared by the HTTP handlers.

use serde_json::json;

use crate::domain::{Error, InventoryId, ProductFilter, ProductId};

/// Error for a required field that was absent from the payload.
pub fn missing_field_error(field: &str) -> Error {
    Error::invalid_request(format!("{field} is required"))
        .with_details(json!({ "field": field }))
}

/// Error for a field whose value could not be interpreted.
pub fn invalid_field_error(field: &str, value: &str, reason: &str) -> Error {
    Error::invalid_request(format!("{field} {reason}")).with_details(json!({
        "field": field,
        "value": value,
    }))
}

/// Parse an inventory id, reporting the offending field on failure.
pub fn parse_inventory_id(field: &str, raw: &str) -> Result<InventoryId, Error> {
    InventoryId::parse(raw).map_err(|_| invalid_field_error(field, raw, "must be a valid id"))
}

/// Parse a product id, reporting the offending field on failure.
pub fn parse_product_id(field: &str, raw: &str) -> Result<ProductId, Error> {
    ProductId::parse(raw).map_err(|_| invalid_field_error(field, raw, "must be a valid id"))
}

/// Parse a listing filter, defaulting to `all` when absent.
pub fn parse_filter(raw: Option<&str>) -> Result<ProductFilter, Error> {
    match raw {
        None | Some("") => Ok(ProductFilter::All),
        Some(value) => value.parse().map_err(|_| {
            invalid_field_error(
                "filter",
                value,
                "must be one of all, in-stock, low-stock, out-of-stock",
            )
        }),
    }
}

/// Validate that a numeric field is non-negative and fits the domain type.
pub fn non_negative_u32(field: &str, value: i64) -> Result<u32, Error> {
    u32::try_from(value).map_err(|_| {
        invalid_field_error(field, &value.to_string(), "must be a non-negative integer")
    })
}
