//! Demo-data seeding service.
//!
//! Fills the caller's default inventory with the fixed demo catalogue. The
//! operation is idempotent per identity: a default inventory that already
//! contains products is reported as already seeded and left untouched.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::info;

use crate::domain::identity::Identity;
use crate::domain::ports::{InventoryRepository, ProductRepository, SeedOps};
use crate::domain::seed::{demo_products, SeedOutcome};
use crate::domain::Result;

/// Seeding service over product and inventory repositories.
#[derive(Clone)]
pub struct SeedService<P, I> {
    products: Arc<P>,
    inventories: Arc<I>,
}

impl<P, I> SeedService<P, I> {
    /// Create a new service with the given repositories.
    pub fn new(products: Arc<P>, inventories: Arc<I>) -> Self {
        Self {
            products,
            inventories,
        }
    }
}

#[async_trait]
impl<P, I> SeedOps for SeedService<P, I>
where
    P: ProductRepository,
    I: InventoryRepository,
{
    async fn seed(&self, identity: &Identity) -> Result<SeedOutcome> {
        let inventory = self
            .inventories
            .find_or_create_default(identity.owner_id())
            .await?;

        let existing = self.products.list_by_inventory(inventory.id).await?;
        if !existing.is_empty() {
            return Ok(SeedOutcome::AlreadySeeded {
                count: existing.len() as u64,
            });
        }

        let rows = demo_products(identity.owner_id(), inventory.id, Utc::now());
        for product in &rows {
            self.products.insert(product).await?;
        }
        info!(
            owner = %identity.owner_id(),
            inventory = %inventory.id,
            count = rows.len(),
            "seeded demo products"
        );
        Ok(SeedOutcome::Seeded {
            count: rows.len() as u64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::identity::OwnerId;
    use crate::domain::inventory::Inventory;
    use crate::domain::ports::{MockInventoryRepository, MockProductRepository};
    use crate::domain::product::{Product, ProductDraft};
    use mockall::predicate::eq;
    use rust_decimal::Decimal;

    fn identity(owner: &str) -> Identity {
        Identity::new(OwnerId::new(owner).expect("owner id"), [])
    }

    fn default_inventory(owner: &str) -> Inventory {
        Inventory::default_for(OwnerId::new(owner).expect("owner id"), Utc::now())
    }

    #[tokio::test]
    async fn seeding_an_empty_default_writes_the_whole_catalogue() {
        let inventory = default_inventory("user_a");
        let inventory_id = inventory.id;
        let owner = OwnerId::new("user_a").expect("owner id");
        let mut inventories = MockInventoryRepository::new();
        inventories
            .expect_find_or_create_default()
            .with(eq(owner))
            .return_once(move |_| Ok(inventory));
        let mut products = MockProductRepository::new();
        products
            .expect_list_by_inventory()
            .return_once(|_| Ok(Vec::new()));
        products
            .expect_insert()
            .withf(move |product: &Product| product.inventory_id == inventory_id)
            .times(25)
            .returning(|_| Ok(()));

        let outcome = SeedService::new(Arc::new(products), Arc::new(inventories))
            .seed(&identity("user_a"))
            .await
            .expect("seed");
        assert_eq!(outcome, SeedOutcome::Seeded { count: 25 });
    }

    #[tokio::test]
    async fn a_populated_inventory_is_reported_as_already_seeded() {
        let inventory = default_inventory("user_a");
        let existing = Product::from_draft(
            inventory.owner_id.clone(),
            inventory.id,
            ProductDraft::new("Widget", Decimal::ONE, 1, 1).expect("draft"),
            Utc::now(),
        );
        let mut inventories = MockInventoryRepository::new();
        inventories
            .expect_find_or_create_default()
            .return_once(move |_| Ok(inventory));
        let mut products = MockProductRepository::new();
        products
            .expect_list_by_inventory()
            .return_once(move |_| Ok(vec![existing]));
        products.expect_insert().never();

        let outcome = SeedService::new(Arc::new(products), Arc::new(inventories))
            .seed(&identity("user_a"))
            .await
            .expect("seed");
        assert_eq!(outcome, SeedOutcome::AlreadySeeded { count: 1 });
    }

    #[tokio::test]
    async fn seeding_creates_the_default_inventory_when_absent() {
        // find_or_create_default is the same atomic primitive the listing
        // uses, so a brand-new identity can seed before ever listing.
        let inventory = default_inventory("user_new");
        let mut inventories = MockInventoryRepository::new();
        inventories
            .expect_find_or_create_default()
            .return_once(move |_| Ok(inventory));
        let mut products = MockProductRepository::new();
        products
            .expect_list_by_inventory()
            .return_once(|_| Ok(Vec::new()));
        products.expect_insert().times(25).returning(|_| Ok(()));

        let outcome = SeedService::new(Arc::new(products), Arc::new(inventories))
            .seed(&identity("user_new"))
            .await
            .expect("seed");
        assert_eq!(outcome, SeedOutcome::Seeded { count: 25 });
    }
}
