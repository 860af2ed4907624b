//! Port for inventory persistence.

use async_trait::async_trait;

use crate::domain::identity::{Identity, OwnerId};
use crate::domain::inventory::{Inventory, InventoryId};

use super::StorageError;

/// Port for inventory storage and retrieval.
///
/// # Atomicity
///
/// Two operations carry atomicity contracts that adapters must honour:
///
/// - [`find_or_create_default`](Self::find_or_create_default) checks for an
///   owned inventory and creates the default in one step, so concurrent
///   first-time listings for the same identity never create two defaults.
/// - [`delete_with_products`](Self::delete_with_products) removes the
///   inventory record and every product referencing it in one step; no
///   reader may observe one gone and the other present as a lasting state.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InventoryRepository: Send + Sync {
    /// Inventories visible to an identity: owned ones plus those whose
    /// allow-list intersects its verified emails, newest first.
    async fn list_visible(&self, identity: &Identity) -> Result<Vec<Inventory>, StorageError>;

    /// Fetch an inventory by id.
    async fn find(&self, id: InventoryId) -> Result<Option<Inventory>, StorageError>;

    /// Persist a freshly created inventory.
    async fn insert(&self, inventory: &Inventory) -> Result<(), StorageError>;

    /// Persist updated inventory metadata.
    async fn update(&self, inventory: &Inventory) -> Result<(), StorageError>;

    /// Count inventories owned by `owner` (shared ones excluded).
    async fn count_owned_by(&self, owner: &OwnerId) -> Result<u64, StorageError>;

    /// Return an inventory owned by `owner`, creating the default "Main
    /// Inventory" atomically when the owner has none.
    async fn find_or_create_default(&self, owner: &OwnerId) -> Result<Inventory, StorageError>;

    /// Delete an inventory and all products referencing it atomically.
    async fn delete_with_products(&self, id: InventoryId) -> Result<(), StorageError>;
}
