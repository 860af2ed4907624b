//! Demo-data seeding HTTP handler.
//!
//! ```text
//! POST /api/v1/seed   Fill the caller's default inventory with demo products
//! ```

use actix_web::{post, web};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{Error, SeedOutcome};
use crate::inbound::http::auth::AuthContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Response payload for a seed request.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SeedResponse {
    pub message: String,
    /// Number of products in the default inventory after the request.
    pub count: u64,
}

impl From<SeedOutcome> for SeedResponse {
    fn from(outcome: SeedOutcome) -> Self {
        match outcome {
            SeedOutcome::Seeded { count } => Self {
                message: "Products seeded successfully".to_owned(),
                count,
            },
            SeedOutcome::AlreadySeeded { count } => Self {
                message: "Products already seeded".to_owned(),
                count,
            },
        }
    }
}

/// Seed the caller's default inventory with the demo catalogue.
///
/// Idempotent: repeating the request reports the inventory as already seeded
/// and writes nothing.
#[utoipa::path(
    post,
    path = "/api/v1/seed",
    description = "Fill the caller's default inventory with demo products.",
    responses(
        (status = 200, description = "Seed outcome", body = SeedResponse),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 503, description = "Service unavailable", body = Error)
    ),
    tags = ["seed"],
    operation_id = "seedProducts"
)]
#[post("/seed")]
pub async fn seed_products(
    state: web::Data<HttpState>,
    auth: AuthContext,
) -> ApiResult<web::Json<SeedResponse>> {
    let outcome = state.seed.seed(auth.identity()).await?;
    Ok(web::Json(SeedResponse::from(outcome)))
}
