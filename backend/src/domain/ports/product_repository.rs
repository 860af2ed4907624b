//! Port for product persistence.

use async_trait::async_trait;

use crate::domain::identity::OwnerId;
use crate::domain::inventory::InventoryId;
use crate::domain::product::{Product, ProductId};

use super::StorageError;

/// Port for product storage and retrieval.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// All products of one inventory, most recently created first.
    async fn list_by_inventory(
        &self,
        inventory_id: InventoryId,
    ) -> Result<Vec<Product>, StorageError>;

    /// Fetch a product by id.
    async fn find(&self, id: ProductId) -> Result<Option<Product>, StorageError>;

    /// Persist a freshly created product.
    async fn insert(&self, product: &Product) -> Result<(), StorageError>;

    /// Persist updated product fields.
    async fn update(&self, product: &Product) -> Result<(), StorageError>;

    /// Delete a product by id; `false` when no such product existed.
    async fn delete(&self, id: ProductId) -> Result<bool, StorageError>;

    /// Atomically delete every listed product owned by `owner`, returning the
    /// number removed. Ids owned by other identities are ignored.
    async fn delete_owned(
        &self,
        owner: &OwnerId,
        ids: &[ProductId],
    ) -> Result<u64, StorageError>;
}
