//! Product CRUD HTTP handlers.
//!
//! ```text
//! GET    /api/v1/products?inventoryId=…   List an inventory's products
//! POST   /api/v1/products                 Create a product
//! GET    /api/v1/products/{id}            Fetch one product
//! PUT    /api/v1/products/{id}            Replace a product's fields
//! DELETE /api/v1/products/{id}            Delete one product
//! POST   /api/v1/products/bulk-delete     Delete several own products
//! ```

use actix_web::{delete, get, post, put, web, HttpResponse};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{
    CreateProductRequest, ProductListQuery, UpdateProductRequest,
};
use crate::domain::{Error, Product, ProductDraft, ProductId, StockStatus};
use crate::inbound::http::auth::AuthContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    invalid_field_error, missing_field_error, non_negative_u32, parse_filter,
    parse_inventory_id, parse_product_id,
};
use crate::inbound::http::ApiResult;

/// Query parameters for the product listing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListProductsParams {
    pub inventory_id: Option<String>,
    pub search: Option<String>,
    pub filter: Option<String>,
}

/// Request payload for creating or replacing a product.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    /// Target inventory; required on create, ignored on update.
    pub inventory_id: Option<String>,
    pub name: Option<String>,
    pub price: Option<Decimal>,
    pub quantity: Option<i64>,
    pub low_stock_at: Option<i64>,
}

/// Request payload for bulk deletion.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BulkDeletePayload {
    pub ids: Option<Vec<String>>,
}

/// Response payload for bulk deletion.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BulkDeleteResponse {
    /// Number of products actually removed.
    pub deleted: u64,
}

/// Response payload for a product, with its derived status and value.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: String,
    pub inventory_id: String,
    pub owner_id: String,
    pub name: String,
    pub price: Decimal,
    pub quantity: u32,
    pub low_stock_at: u32,
    pub status: StockStatus,
    pub total_value: Decimal,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Product> for ProductResponse {
    fn from(value: Product) -> Self {
        let status = value.stock_status();
        let total_value = value.total_value();
        Self {
            id: value.id.to_string(),
            inventory_id: value.inventory_id.to_string(),
            owner_id: value.owner_id.to_string(),
            name: value.name,
            price: value.price,
            quantity: value.quantity,
            low_stock_at: value.low_stock_at,
            status,
            total_value,
            created_at: value.created_at.to_rfc3339(),
            updated_at: value.updated_at.to_rfc3339(),
        }
    }
}

fn draft_error(error: crate::domain::product::ProductValidationError) -> Error {
    Error::invalid_request(error.to_string())
}

fn parse_draft(payload: &ProductPayload) -> Result<ProductDraft, Error> {
    let name = payload
        .name
        .as_deref()
        .ok_or_else(|| missing_field_error("name"))?;
    let price = payload.price.ok_or_else(|| missing_field_error("price"))?;
    let quantity =
        non_negative_u32("quantity", payload.quantity.ok_or_else(|| missing_field_error("quantity"))?)?;
    let low_stock_at = non_negative_u32(
        "lowStockAt",
        payload
            .low_stock_at
            .ok_or_else(|| missing_field_error("lowStockAt"))?,
    )?;
    ProductDraft::new(name, price, quantity, low_stock_at).map_err(draft_error)
}

fn parse_id_list(raw: Vec<String>) -> Result<Vec<ProductId>, Error> {
    raw.iter()
        .map(|entry| {
            ProductId::parse(entry)
                .map_err(|_| invalid_field_error("ids", entry, "must be a valid id"))
        })
        .collect()
}

/// List an inventory's products with optional search and status filter.
#[utoipa::path(
    get,
    path = "/api/v1/products",
    description = "List an inventory's products, newest first.",
    params(
        ("inventoryId" = String, Query, description = "Inventory id"),
        ("search" = Option<String>, Query, description = "Case-insensitive name substring"),
        ("filter" = Option<String>, Query, description = "all, in-stock, low-stock or out-of-stock")
    ),
    responses(
        (status = 200, description = "Products", body = [ProductResponse]),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["products"],
    operation_id = "listProducts"
)]
#[get("/products")]
pub async fn list_products(
    state: web::Data<HttpState>,
    auth: AuthContext,
    params: web::Query<ListProductsParams>,
) -> ApiResult<web::Json<Vec<ProductResponse>>> {
    let params = params.into_inner();
    let inventory_id = params
        .inventory_id
        .as_deref()
        .ok_or_else(|| missing_field_error("inventoryId"))
        .and_then(|raw| parse_inventory_id("inventoryId", raw))?;
    let query = ProductListQuery {
        search: params.search.filter(|s| !s.trim().is_empty()),
        filter: parse_filter(params.filter.as_deref())?,
    };

    let products = state
        .products
        .list(auth.identity(), inventory_id, query)
        .await?;
    Ok(web::Json(
        products.into_iter().map(ProductResponse::from).collect(),
    ))
}

/// Create a product in an accessible inventory.
#[utoipa::path(
    post,
    path = "/api/v1/products",
    request_body = ProductPayload,
    responses(
        (status = 201, description = "Created product", body = ProductResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["products"],
    operation_id = "createProduct"
)]
#[post("/products")]
pub async fn create_product(
    state: web::Data<HttpState>,
    auth: AuthContext,
    payload: web::Json<ProductPayload>,
) -> ApiResult<HttpResponse> {
    let payload = payload.into_inner();
    let inventory_id = payload
        .inventory_id
        .as_deref()
        .ok_or_else(|| missing_field_error("inventoryId"))
        .and_then(|raw| parse_inventory_id("inventoryId", raw))?;
    let draft = parse_draft(&payload)?;

    let created = state
        .products
        .create(
            auth.identity(),
            CreateProductRequest {
                inventory_id,
                draft,
            },
        )
        .await?;
    Ok(HttpResponse::Created().json(ProductResponse::from(created)))
}

/// Fetch one product.
#[utoipa::path(
    get,
    path = "/api/v1/products/{id}",
    responses(
        (status = 200, description = "Product", body = ProductResponse),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    params(("id" = String, Path, description = "Product id")),
    tags = ["products"],
    operation_id = "getProduct"
)]
#[get("/products/{id}")]
pub async fn get_product(
    state: web::Data<HttpState>,
    auth: AuthContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<ProductResponse>> {
    let id = parse_product_id("id", &path.into_inner())?;
    let product = state.products.get(auth.identity(), id).await?;
    Ok(web::Json(ProductResponse::from(product)))
}

/// Replace a product's mutable fields.
#[utoipa::path(
    put,
    path = "/api/v1/products/{id}",
    request_body = ProductPayload,
    responses(
        (status = 200, description = "Updated product", body = ProductResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    params(("id" = String, Path, description = "Product id")),
    tags = ["products"],
    operation_id = "updateProduct"
)]
#[put("/products/{id}")]
pub async fn update_product(
    state: web::Data<HttpState>,
    auth: AuthContext,
    path: web::Path<String>,
    payload: web::Json<ProductPayload>,
) -> ApiResult<web::Json<ProductResponse>> {
    let id = parse_product_id("id", &path.into_inner())?;
    let draft = parse_draft(&payload.into_inner())?;
    let updated = state
        .products
        .update(auth.identity(), id, UpdateProductRequest { draft })
        .await?;
    Ok(web::Json(ProductResponse::from(updated)))
}

/// Delete one product.
#[utoipa::path(
    delete,
    path = "/api/v1/products/{id}",
    responses(
        (status = 204, description = "Product deleted"),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    params(("id" = String, Path, description = "Product id")),
    tags = ["products"],
    operation_id = "deleteProduct"
)]
#[delete("/products/{id}")]
pub async fn delete_product(
    state: web::Data<HttpState>,
    auth: AuthContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_product_id("id", &path.into_inner())?;
    state.products.delete(auth.identity(), id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Delete several of the caller's own products in one call.
///
/// Ids the caller does not own are skipped, not errors; the response reports
/// how many products were actually removed.
#[utoipa::path(
    post,
    path = "/api/v1/products/bulk-delete",
    request_body = BulkDeletePayload,
    responses(
        (status = 200, description = "Deletion summary", body = BulkDeleteResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["products"],
    operation_id = "bulkDeleteProducts"
)]
#[post("/products/bulk-delete")]
pub async fn bulk_delete_products(
    state: web::Data<HttpState>,
    auth: AuthContext,
    payload: web::Json<BulkDeletePayload>,
) -> ApiResult<web::Json<BulkDeleteResponse>> {
    let ids = payload
        .into_inner()
        .ids
        .ok_or_else(|| missing_field_error("ids"))
        .and_then(parse_id_list)?;
    let deleted = state.products.bulk_delete(auth.identity(), ids).await?;
    Ok(web::Json(BulkDeleteResponse { deleted }))
}
