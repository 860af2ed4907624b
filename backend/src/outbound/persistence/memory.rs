//! In-process storage adapter.
//!
//! The document store proper is an external collaborator; this adapter backs
//! the repository ports with plain maps behind a single lock so the atomicity
//! contracts hold: default creation, cascade deletion, and bulk deletion each
//! run in one critical section. A database-backed adapter would replace this
//! file without touching the domain.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::identity::{Identity, OwnerId};
use crate::domain::inventory::{Inventory, InventoryId};
use crate::domain::ports::{
    InventoryRepository, ProductRepository, SettingsRepository, StorageError,
};
use crate::domain::product::{Product, ProductId};
use crate::domain::settings::UserSettings;

#[derive(Debug, Default)]
struct Tables {
    inventories: HashMap<InventoryId, Inventory>,
    products: HashMap<ProductId, Product>,
    settings: HashMap<OwnerId, UserSettings>,
}

/// Shared in-process store implementing every repository port.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn with_tables<T>(&self, f: impl FnOnce(&mut Tables) -> T) -> T {
        // A poisoned lock only means another request panicked mid-write;
        // the data itself is still a consistent snapshot.
        let mut guard = self
            .tables
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }
}

fn newest_first_inventories(mut rows: Vec<Inventory>) -> Vec<Inventory> {
    rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    rows
}

fn newest_first_products(mut rows: Vec<Product>) -> Vec<Product> {
    rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    rows
}

#[async_trait]
impl InventoryRepository for MemoryStore {
    async fn list_visible(&self, identity: &Identity) -> Result<Vec<Inventory>, StorageError> {
        let rows = self.with_tables(|tables| {
            tables
                .inventories
                .values()
                .filter(|inventory| {
                    &inventory.owner_id == identity.owner_id()
                        || identity.shares_email_with(&inventory.allowed_emails)
                })
                .cloned()
                .collect::<Vec<_>>()
        });
        Ok(newest_first_inventories(rows))
    }

    async fn find(&self, id: InventoryId) -> Result<Option<Inventory>, StorageError> {
        Ok(self.with_tables(|tables| tables.inventories.get(&id).cloned()))
    }

    async fn insert(&self, inventory: &Inventory) -> Result<(), StorageError> {
        self.with_tables(|tables| {
            tables.inventories.insert(inventory.id, inventory.clone());
        });
        Ok(())
    }

    async fn update(&self, inventory: &Inventory) -> Result<(), StorageError> {
        self.with_tables(|tables| {
            if !tables.inventories.contains_key(&inventory.id) {
                return Err(StorageError::query(format!(
                    "inventory {} does not exist",
                    inventory.id
                )));
            }
            tables.inventories.insert(inventory.id, inventory.clone());
            Ok(())
        })
    }

    async fn count_owned_by(&self, owner: &OwnerId) -> Result<u64, StorageError> {
        Ok(self.with_tables(|tables| {
            tables
                .inventories
                .values()
                .filter(|inventory| &inventory.owner_id == owner)
                .count() as u64
        }))
    }

    async fn find_or_create_default(&self, owner: &OwnerId) -> Result<Inventory, StorageError> {
        // Check and create under one lock; this is the uniqueness guarantee
        // a database adapter would get from a unique constraint.
        Ok(self.with_tables(|tables| {
            let existing = tables
                .inventories
                .values()
                .filter(|inventory| &inventory.owner_id == owner)
                .min_by_key(|inventory| inventory.created_at)
                .cloned();
            if let Some(inventory) = existing {
                return inventory;
            }
            let default = Inventory::default_for(owner.clone(), Utc::now());
            tables.inventories.insert(default.id, default.clone());
            default
        }))
    }

    async fn delete_with_products(&self, id: InventoryId) -> Result<(), StorageError> {
        self.with_tables(|tables| {
            tables.products.retain(|_, product| product.inventory_id != id);
            tables.inventories.remove(&id);
        });
        Ok(())
    }
}

#[async_trait]
impl ProductRepository for MemoryStore {
    async fn list_by_inventory(
        &self,
        inventory_id: InventoryId,
    ) -> Result<Vec<Product>, StorageError> {
        let rows = self.with_tables(|tables| {
            tables
                .products
                .values()
                .filter(|product| product.inventory_id == inventory_id)
                .cloned()
                .collect::<Vec<_>>()
        });
        Ok(newest_first_products(rows))
    }

    async fn find(&self, id: ProductId) -> Result<Option<Product>, StorageError> {
        Ok(self.with_tables(|tables| tables.products.get(&id).cloned()))
    }

    async fn insert(&self, product: &Product) -> Result<(), StorageError> {
        self.with_tables(|tables| {
            tables.products.insert(product.id, product.clone());
        });
        Ok(())
    }

    async fn update(&self, product: &Product) -> Result<(), StorageError> {
        self.with_tables(|tables| {
            if !tables.products.contains_key(&product.id) {
                return Err(StorageError::query(format!(
                    "product {} does not exist",
                    product.id
                )));
            }
            tables.products.insert(product.id, product.clone());
            Ok(())
        })
    }

    async fn delete(&self, id: ProductId) -> Result<bool, StorageError> {
        Ok(self.with_tables(|tables| tables.products.remove(&id).is_some()))
    }

    async fn delete_owned(
        &self,
        owner: &OwnerId,
        ids: &[ProductId],
    ) -> Result<u64, StorageError> {
        Ok(self.with_tables(|tables| {
            let mut deleted = 0;
            for id in ids {
                let owned = tables
                    .products
                    .get(id)
                    .is_some_and(|product| &product.owner_id == owner);
                if owned && tables.products.remove(id).is_some() {
                    deleted += 1;
                }
            }
            deleted
        }))
    }
}

#[async_trait]
impl SettingsRepository for MemoryStore {
    async fn find(&self, owner: &OwnerId) -> Result<Option<UserSettings>, StorageError> {
        Ok(self.with_tables(|tables| tables.settings.get(owner).cloned()))
    }

    async fn find_or_create_default(
        &self,
        owner: &OwnerId,
    ) -> Result<UserSettings, StorageError> {
        Ok(self.with_tables(|tables| {
            tables
                .settings
                .entry(owner.clone())
                .or_insert_with(|| UserSettings::default_for(owner.clone(), Utc::now()))
                .clone()
        }))
    }

    async fn upsert(&self, settings: &UserSettings) -> Result<(), StorageError> {
        self.with_tables(|tables| {
            tables
                .settings
                .insert(settings.owner_id.clone(), settings.clone());
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::identity::EmailAddress;
    use crate::domain::product::ProductDraft;
    use rust_decimal::Decimal;
    use std::sync::Arc;

    fn owner(id: &str) -> OwnerId {
        OwnerId::new(id).expect("owner id")
    }

    fn identity(id: &str, emails: &[&str]) -> Identity {
        Identity::new(
            owner(id),
            emails
                .iter()
                .map(|raw| EmailAddress::new(raw).expect("email")),
        )
    }

    fn inventory(owner_id: &str) -> Inventory {
        Inventory::new(owner(owner_id), "Warehouse", None, Utc::now()).expect("inventory")
    }

    fn product_in(inventory: &Inventory, name: &str) -> Product {
        Product::from_draft(
            inventory.owner_id.clone(),
            inventory.id,
            ProductDraft::new(name, Decimal::ONE, 1, 1).expect("draft"),
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn list_visible_includes_owned_and_shared() {
        let store = MemoryStore::new();
        let owned = inventory("user_a");
        let mut shared = inventory("user_b");
        shared.allowed_emails = [EmailAddress::new("a@example.com").expect("email")]
            .into_iter()
            .collect();
        let hidden = inventory("user_c");
        for row in [&owned, &shared, &hidden] {
            InventoryRepository::insert(&store, row).await.expect("insert");
        }

        let visible = store
            .list_visible(&identity("user_a", &["a@example.com"]))
            .await
            .expect("list");
        let ids: Vec<InventoryId> = visible.iter().map(|inventory| inventory.id).collect();
        assert!(ids.contains(&owned.id));
        assert!(ids.contains(&shared.id));
        assert!(!ids.contains(&hidden.id));
    }

    #[tokio::test]
    async fn find_or_create_default_is_idempotent_per_owner() {
        let store = MemoryStore::new();
        let first = InventoryRepository::find_or_create_default(&store, &owner("user_a"))
            .await
            .expect("first");
        let second = InventoryRepository::find_or_create_default(&store, &owner("user_a"))
            .await
            .expect("second");
        assert_eq!(first.id, second.id);
        assert!(first.is_default);
        assert_eq!(
            InventoryRepository::count_owned_by(&store, &owner("user_a"))
                .await
                .expect("count"),
            1
        );
    }

    #[tokio::test]
    async fn concurrent_default_creation_yields_one_inventory() {
        let store = Arc::new(MemoryStore::new());
        let mut handles = Vec::new();
        for _ in 0..8 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                InventoryRepository::find_or_create_default(&*store, &owner("user_race")).await
            }));
        }
        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.expect("join").expect("create").id);
        }
        ids.dedup();
        assert_eq!(ids.len(), 1);
    }

    #[tokio::test]
    async fn cascade_delete_removes_products_with_the_inventory() {
        let store = MemoryStore::new();
        let keep = inventory("user_a");
        let doomed = inventory("user_a");
        InventoryRepository::insert(&store, &keep).await.expect("insert");
        InventoryRepository::insert(&store, &doomed).await.expect("insert");
        let survivor = product_in(&keep, "Survivor");
        ProductRepository::insert(&store, &survivor).await.expect("insert");
        ProductRepository::insert(&store, &product_in(&doomed, "Casualty 1"))
            .await
            .expect("insert");
        ProductRepository::insert(&store, &product_in(&doomed, "Casualty 2"))
            .await
            .expect("insert");

        store.delete_with_products(doomed.id).await.expect("delete");

        assert!(InventoryRepository::find(&store, doomed.id)
            .await
            .expect("find")
            .is_none());
        assert!(store
            .list_by_inventory(doomed.id)
            .await
            .expect("list")
            .is_empty());
        assert_eq!(
            store.list_by_inventory(keep.id).await.expect("list"),
            vec![survivor]
        );
    }

    #[tokio::test]
    async fn bulk_delete_skips_other_owners_products() {
        let store = MemoryStore::new();
        let mine = inventory("user_a");
        let theirs = inventory("user_b");
        let my_product = product_in(&mine, "Mine");
        let their_product = product_in(&theirs, "Theirs");
        ProductRepository::insert(&store, &my_product).await.expect("insert");
        ProductRepository::insert(&store, &their_product).await.expect("insert");

        let deleted = store
            .delete_owned(&owner("user_a"), &[my_product.id, their_product.id])
            .await
            .expect("bulk delete");
        assert_eq!(deleted, 1);
        assert!(ProductRepository::find(&store, their_product.id)
            .await
            .expect("find")
            .is_some());
    }

    #[tokio::test]
    async fn product_listing_is_newest_first() {
        let store = MemoryStore::new();
        let home = inventory("user_a");
        let mut older = product_in(&home, "Older");
        older.created_at = Utc::now() - chrono::Duration::days(2);
        let newer = product_in(&home, "Newer");
        ProductRepository::insert(&store, &older).await.expect("insert");
        ProductRepository::insert(&store, &newer).await.expect("insert");

        let rows = store.list_by_inventory(home.id).await.expect("list");
        let names: Vec<&str> = rows.iter().map(|product| product.name.as_str()).collect();
        assert_eq!(names, vec!["Newer", "Older"]);
    }

    #[tokio::test]
    async fn settings_default_then_upsert_round_trip() {
        let store = MemoryStore::new();
        let first = SettingsRepository::find_or_create_default(&store, &owner("user_a"))
            .await
            .expect("defaults");
        let mut updated = first.clone();
        updated.apply_update(
            crate::domain::settings::SettingsUpdate {
                currency: Some(crate::domain::settings::Currency::Yen),
                ..Default::default()
            },
            Utc::now(),
        );
        store.upsert(&updated).await.expect("upsert");

        let reread = SettingsRepository::find(&store, &owner("user_a"))
            .await
            .expect("find")
            .expect("present");
        assert_eq!(reread.currency, crate::domain::settings::Currency::Yen);
    }

    #[tokio::test]
    async fn update_of_missing_product_is_a_query_error() {
        let store = MemoryStore::new();
        let ghost = product_in(&inventory("user_a"), "Ghost");
        let err = ProductRepository::update(&store, &ghost)
            .await
            .expect_err("missing row");
        assert!(matches!(err, StorageError::Query { .. }));
    }
}
