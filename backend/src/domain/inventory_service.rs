//! Inventory lifecycle service.
//!
//! Implements [`InventoryOps`]: lazy default creation on first listing,
//! owner-only metadata mutation, and deletion with the last-inventory guard
//! and product cascade.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use tracing::info;

use crate::domain::access;
use crate::domain::identity::Identity;
use crate::domain::inventory::{Inventory, InventoryId, InventoryUpdate, InventoryValidationError};
use crate::domain::ports::{
    CreateInventoryRequest, InventoryOps, InventoryRepository, UpdateInventoryRequest,
};
use crate::domain::{Error, Result};

/// Inventory service over an [`InventoryRepository`].
#[derive(Clone)]
pub struct InventoryService<R> {
    inventories: Arc<R>,
}

impl<R> InventoryService<R> {
    /// Create a new service with the given repository.
    pub fn new(inventories: Arc<R>) -> Self {
        Self { inventories }
    }
}

fn validation_error(error: InventoryValidationError) -> Error {
    match error {
        InventoryValidationError::EmptyName => {
            Error::invalid_request("inventory name is required")
                .with_details(json!({ "field": "name" }))
        }
    }
}

impl<R> InventoryService<R>
where
    R: InventoryRepository,
{
    async fn load(&self, id: InventoryId) -> Result<Inventory> {
        self.inventories
            .find(id)
            .await?
            .ok_or_else(|| Error::not_found("inventory not found"))
    }
}

#[async_trait]
impl<R> InventoryOps for InventoryService<R>
where
    R: InventoryRepository,
{
    async fn list(&self, identity: &Identity) -> Result<Vec<Inventory>> {
        let visible = self.inventories.list_visible(identity).await?;
        if !visible.is_empty() {
            return Ok(visible);
        }

        // First contact: hand creation to the repository's atomic primitive
        // so concurrent initial listings cannot mint two defaults.
        let default = self
            .inventories
            .find_or_create_default(identity.owner_id())
            .await?;
        info!(owner = %identity.owner_id(), inventory = %default.id, "created default inventory");
        Ok(vec![default])
    }

    async fn create(
        &self,
        identity: &Identity,
        request: CreateInventoryRequest,
    ) -> Result<Inventory> {
        let inventory = Inventory::new(
            identity.owner_id().clone(),
            &request.name,
            request.description.as_deref(),
            Utc::now(),
        )
        .map_err(validation_error)?;

        self.inventories.insert(&inventory).await?;
        Ok(inventory)
    }

    async fn update(
        &self,
        identity: &Identity,
        id: InventoryId,
        request: UpdateInventoryRequest,
    ) -> Result<Inventory> {
        let mut inventory = self.load(id).await?;
        access::ensure_can_manage(identity, &inventory)?;

        inventory
            .apply_update(
                InventoryUpdate {
                    name: request.name,
                    description: request.description,
                    allowed_emails: request.allowed_emails,
                },
                Utc::now(),
            )
            .map_err(validation_error)?;

        self.inventories.update(&inventory).await?;
        Ok(inventory)
    }

    async fn delete(&self, identity: &Identity, id: InventoryId) -> Result<()> {
        let inventory = self.load(id).await?;
        access::ensure_can_manage(identity, &inventory)?;

        let owned = self.inventories.count_owned_by(identity.owner_id()).await?;
        if owned <= 1 {
            return Err(Error::conflict("cannot delete your only inventory")
                .with_details(json!({ "code": "last_inventory" })));
        }

        self.inventories.delete_with_products(id).await?;
        info!(owner = %identity.owner_id(), inventory = %id, "deleted inventory with products");
        Ok(())
    }
}
