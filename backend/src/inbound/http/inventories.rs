//! Inventory lifecycle HTTP handlers.
//!
//! ```text
//! GET    /api/v1/inventories        List visible inventories
//! POST   /api/v1/inventories        Create an inventory
//! PUT    /api/v1/inventories/{id}   Update inventory metadata (owner only)
//! DELETE /api/v1/inventories/{id}   Delete an inventory (owner only)
//! ```

use std::collections::BTreeSet;

use actix_web::{delete, get, post, put, web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{CreateInventoryRequest, UpdateInventoryRequest};
use crate::domain::{EmailAddress, Error, Inventory};
use crate::inbound::http::auth::AuthContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{missing_field_error, parse_inventory_id};
use crate::inbound::http::ApiResult;

/// Request payload for creating an inventory.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateInventoryPayload {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Request payload for updating inventory metadata.
///
/// `allowedEmails`, when present, replaces the whole allow-list.
#[derive(Debug, Deserialize, Serialize, Default, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInventoryPayload {
    pub name: Option<String>,
    pub description: Option<String>,
    pub allowed_emails: Option<Vec<String>>,
}

/// Response payload for an inventory.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InventoryResponse {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub description: String,
    pub is_default: bool,
    pub allowed_emails: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Inventory> for InventoryResponse {
    fn from(value: Inventory) -> Self {
        Self {
            id: value.id.to_string(),
            owner_id: value.owner_id.to_string(),
            name: value.name,
            description: value.description,
            is_default: value.is_default,
            allowed_emails: value
                .allowed_emails
                .into_iter()
                .map(|email| email.to_string())
                .collect(),
            created_at: value.created_at.to_rfc3339(),
            updated_at: value.updated_at.to_rfc3339(),
        }
    }
}

fn invalid_email_error(value: &str) -> Error {
    Error::invalid_request("allowed emails must be valid addresses").with_details(
        serde_json::json!({
            "field": "allowedEmails",
            "value": value,
        }),
    )
}

fn parse_allowed_emails(raw: Vec<String>) -> Result<BTreeSet<EmailAddress>, Error> {
    raw.into_iter()
        .map(|entry| EmailAddress::new(&entry).map_err(|_| invalid_email_error(&entry)))
        .collect()
}

fn parse_update_payload(payload: UpdateInventoryPayload) -> Result<UpdateInventoryRequest, Error> {
    Ok(UpdateInventoryRequest {
        name: payload.name,
        description: payload.description,
        allowed_emails: payload.allowed_emails.map(parse_allowed_emails).transpose()?,
    })
}

/// List the inventories visible to the caller.
#[utoipa::path(
    get,
    path = "/api/v1/inventories",
    description = "List visible inventories, creating the default on first call.",
    responses(
        (status = 200, description = "Visible inventories", body = [InventoryResponse]),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 503, description = "Service unavailable", body = Error)
    ),
    tags = ["inventories"],
    operation_id = "listInventories"
)]
#[get("/inventories")]
pub async fn list_inventories(
    state: web::Data<HttpState>,
    auth: AuthContext,
) -> ApiResult<web::Json<Vec<InventoryResponse>>> {
    let inventories = state.inventories.list(auth.identity()).await?;
    Ok(web::Json(
        inventories.into_iter().map(InventoryResponse::from).collect(),
    ))
}

/// Create a new inventory owned by the caller.
#[utoipa::path(
    post,
    path = "/api/v1/inventories",
    request_body = CreateInventoryPayload,
    responses(
        (status = 201, description = "Created inventory", body = InventoryResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["inventories"],
    operation_id = "createInventory"
)]
#[post("/inventories")]
pub async fn create_inventory(
    state: web::Data<HttpState>,
    auth: AuthContext,
    payload: web::Json<CreateInventoryPayload>,
) -> ApiResult<HttpResponse> {
    let payload = payload.into_inner();
    let name = payload.name.ok_or_else(|| missing_field_error("name"))?;
    let created = state
        .inventories
        .create(
            auth.identity(),
            CreateInventoryRequest {
                name,
                description: payload.description,
            },
        )
        .await?;
    Ok(HttpResponse::Created().json(InventoryResponse::from(created)))
}

/// Update inventory metadata; only the owner may do this.
#[utoipa::path(
    put,
    path = "/api/v1/inventories/{id}",
    request_body = UpdateInventoryPayload,
    responses(
        (status = 200, description = "Updated inventory", body = InventoryResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    params(("id" = String, Path, description = "Inventory id")),
    tags = ["inventories"],
    operation_id = "updateInventory"
)]
#[put("/inventories/{id}")]
pub async fn update_inventory(
    state: web::Data<HttpState>,
    auth: AuthContext,
    path: web::Path<String>,
    payload: web::Json<UpdateInventoryPayload>,
) -> ApiResult<web::Json<InventoryResponse>> {
    let id = parse_inventory_id("id", &path.into_inner())?;
    let request = parse_update_payload(payload.into_inner())?;
    let updated = state.inventories.update(auth.identity(), id, request).await?;
    Ok(web::Json(InventoryResponse::from(updated)))
}

/// Delete an inventory and all of its products; only the owner may do this.
#[utoipa::path(
    delete,
    path = "/api/v1/inventories/{id}",
    responses(
        (status = 204, description = "Inventory deleted"),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 409, description = "Cannot delete the last inventory", body = Error)
    ),
    params(("id" = String, Path, description = "Inventory id")),
    tags = ["inventories"],
    operation_id = "deleteInventory"
)]
#[delete("/inventories/{id}")]
pub async fn delete_inventory(
    state: web::Data<HttpState>,
    auth: AuthContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_inventory_id("id", &path.into_inner())?;
    state.inventories.delete(auth.identity(), id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ErrorCode, OwnerId};
    use chrono::Utc;
    use rstest::rstest;

    #[test]
    fn update_payload_parses_and_lowercases_emails() {
        let request = parse_update_payload(UpdateInventoryPayload {
            allowed_emails: Some(vec!["Alice@Example.com".to_owned()]),
            ..UpdateInventoryPayload::default()
        })
        .expect("payload");

        let emails = request.allowed_emails.expect("emails");
        assert!(emails.contains(&EmailAddress::new("alice@example.com").expect("email")));
    }

    #[rstest]
    #[case("not-an-email")]
    #[case("")]
    fn update_payload_rejects_malformed_emails(#[case] raw: &str) {
        let err = parse_update_payload(UpdateInventoryPayload {
            allowed_emails: Some(vec![raw.to_owned()]),
            ..UpdateInventoryPayload::default()
        })
        .expect_err("malformed email");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }

    #[test]
    fn response_maps_domain_values() {
        let owner = OwnerId::new("user_1").expect("owner");
        let inventory = Inventory::new(owner, "Warehouse", Some("north"), Utc::now())
            .expect("inventory");

        let response = InventoryResponse::from(inventory.clone());
        assert_eq!(response.id, inventory.id.to_string());
        assert_eq!(response.name, "Warehouse");
        assert_eq!(response.description, "north");
        assert!(!response.is_default);
        assert!(response.allowed_emails.is_empty());
    }
}
