//! Dashboard and stats HTTP handlers.
//!
//! ```text
//! GET /api/v1/dashboard?inventoryId=…   Full dashboard for one inventory
//! GET /api/v1/stats?inventoryId=…       Headline stats for one inventory
//! ```
//!
//! The reporting payloads serialise straight from the domain types; there is
//! nothing transport-specific to add.

use actix_web::{get, web};
use serde::Deserialize;

use crate::domain::{DashboardReport, Error, InventoryStats};
use crate::inbound::http::auth::AuthContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{missing_field_error, parse_inventory_id};
use crate::inbound::http::ApiResult;

/// Query parameters shared by the reporting endpoints.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportParams {
    pub inventory_id: Option<String>,
}

fn target_inventory(params: &ReportParams) -> Result<crate::domain::InventoryId, Error> {
    params
        .inventory_id
        .as_deref()
        .ok_or_else(|| missing_field_error("inventoryId"))
        .and_then(|raw| parse_inventory_id("inventoryId", raw))
}

/// Full dashboard: metrics, weekly histogram, recent products, efficiency.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard",
    params(("inventoryId" = String, Query, description = "Inventory id")),
    responses(
        (status = 200, description = "Dashboard", body = DashboardReport),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["reporting"],
    operation_id = "getDashboard"
)]
#[get("/dashboard")]
pub async fn get_dashboard(
    state: web::Data<HttpState>,
    auth: AuthContext,
    params: web::Query<ReportParams>,
) -> ApiResult<web::Json<DashboardReport>> {
    let inventory_id = target_inventory(&params)?;
    let report = state.reporting.dashboard(auth.identity(), inventory_id).await?;
    Ok(web::Json(report))
}

/// Headline stats: totals plus the low- and out-of-stock alert counts.
#[utoipa::path(
    get,
    path = "/api/v1/stats",
    params(("inventoryId" = String, Query, description = "Inventory id")),
    responses(
        (status = 200, description = "Stats", body = InventoryStats),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["reporting"],
    operation_id = "getStats"
)]
#[get("/stats")]
pub async fn get_stats(
    state: web::Data<HttpState>,
    auth: AuthContext,
    params: web::Query<ReportParams>,
) -> ApiResult<web::Json<InventoryStats>> {
    let inventory_id = target_inventory(&params)?;
    let stats = state.reporting.stats(auth.identity(), inventory_id).await?;
    Ok(web::Json(stats))
}
