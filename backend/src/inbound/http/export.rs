//! CSV export HTTP handler.
//!
//! ```text
//! GET /api/v1/export?inventoryId=…   Download an inventory as CSV
//! ```

use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{get, web, HttpResponse};
use serde::Deserialize;

use crate::domain::Error;
use crate::inbound::http::auth::AuthContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{missing_field_error, parse_inventory_id};
use crate::inbound::http::ApiResult;

/// Query parameters for the export endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportParams {
    pub inventory_id: Option<String>,
}

/// Download an inventory's products as a CSV attachment.
///
/// Dates are rendered with the caller's configured date format and the
/// attachment is named `inventory-YYYY-MM-DD.csv` after the export day.
#[utoipa::path(
    get,
    path = "/api/v1/export",
    params(("inventoryId" = String, Query, description = "Inventory id")),
    responses(
        (status = 200, description = "CSV attachment", content_type = "text/csv"),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["reporting"],
    operation_id = "exportInventoryCsv"
)]
#[get("/export")]
pub async fn export_csv(
    state: web::Data<HttpState>,
    auth: AuthContext,
    params: web::Query<ExportParams>,
) -> ApiResult<HttpResponse> {
    let inventory_id = params
        .inventory_id
        .as_deref()
        .ok_or_else(|| missing_field_error("inventoryId"))
        .and_then(|raw| parse_inventory_id("inventoryId", raw))?;

    let document = state
        .reporting
        .export_csv(auth.identity(), inventory_id)
        .await?;

    Ok(HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(document.filename)],
        })
        .body(document.content))
}
