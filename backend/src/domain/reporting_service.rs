//! Read-only aggregation service: dashboard, stats, and CSV export.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::access;
use crate::domain::csv_export::{CsvDocument, CsvExporter};
use crate::domain::identity::Identity;
use crate::domain::inventory::InventoryId;
use crate::domain::ports::{
    InventoryRepository, ProductRepository, ReportingOps, SettingsRepository,
};
use crate::domain::product::Product;
use crate::domain::reporting::{DashboardReport, InventoryStats};
use crate::domain::{Error, Result};

/// Aggregation service over product, inventory, and settings repositories.
///
/// Settings are only consulted for CSV export, where the requester's date
/// format decides how the `Added` column renders.
#[derive(Clone)]
pub struct ReportingService<P, I, S> {
    products: Arc<P>,
    inventories: Arc<I>,
    settings: Arc<S>,
}

impl<P, I, S> ReportingService<P, I, S> {
    /// Create a new service with the given repositories.
    pub fn new(products: Arc<P>, inventories: Arc<I>, settings: Arc<S>) -> Self {
        Self {
            products,
            inventories,
            settings,
        }
    }
}

impl<P, I, S> ReportingService<P, I, S>
where
    P: ProductRepository,
    I: InventoryRepository,
    S: SettingsRepository,
{
    async fn accessible_snapshot(
        &self,
        identity: &Identity,
        inventory_id: InventoryId,
    ) -> Result<Vec<Product>> {
        let inventory = self
            .inventories
            .find(inventory_id)
            .await?
            .ok_or_else(|| Error::not_found("inventory not found"))?;
        access::ensure_can_use(identity, &inventory)?;
        Ok(self.products.list_by_inventory(inventory_id).await?)
    }
}

#[async_trait]
impl<P, I, S> ReportingOps for ReportingService<P, I, S>
where
    P: ProductRepository,
    I: InventoryRepository,
    S: SettingsRepository,
{
    async fn dashboard(
        &self,
        identity: &Identity,
        inventory_id: InventoryId,
    ) -> Result<DashboardReport> {
        let products = self.accessible_snapshot(identity, inventory_id).await?;
        Ok(DashboardReport::build(&products, Utc::now()))
    }

    async fn stats(
        &self,
        identity: &Identity,
        inventory_id: InventoryId,
    ) -> Result<InventoryStats> {
        let products = self.accessible_snapshot(identity, inventory_id).await?;
        Ok(InventoryStats::build(&products))
    }

    async fn export_csv(
        &self,
        identity: &Identity,
        inventory_id: InventoryId,
    ) -> Result<CsvDocument> {
        let products = self.accessible_snapshot(identity, inventory_id).await?;
        let settings = self
            .settings
            .find_or_create_default(identity.owner_id())
            .await?;
        Ok(CsvExporter::new(settings.date_format).export(&products, Utc::now()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::csv_export::CSV_HEADER;
    use crate::domain::identity::{EmailAddress, OwnerId};
    use crate::domain::inventory::Inventory;
    use crate::domain::ports::{
        MockInventoryRepository, MockProductRepository, MockSettingsRepository,
    };
    use crate::domain::product::ProductDraft;
    use crate::domain::settings::{DateFormat, SettingsUpdate, UserSettings};
    use crate::domain::ErrorCode;
    use rust_decimal::Decimal;

    fn identity(owner: &str) -> Identity {
        Identity::new(OwnerId::new(owner).expect("owner id"), [])
    }

    fn inventory_owned_by(owner: &str, allowed: &[&str]) -> Inventory {
        let mut inventory = Inventory::new(
            OwnerId::new(owner).expect("owner id"),
            "Warehouse",
            None,
            Utc::now(),
        )
        .expect("inventory");
        inventory.allowed_emails = allowed
            .iter()
            .map(|raw| EmailAddress::new(raw).expect("email"))
            .collect();
        inventory
    }

    fn product_in(inventory: &Inventory, name: &str, quantity: u32) -> Product {
        Product::from_draft(
            inventory.owner_id.clone(),
            inventory.id,
            ProductDraft::new(name, Decimal::TEN, quantity, 5).expect("draft"),
            Utc::now(),
        )
    }

    fn service(
        products: MockProductRepository,
        inventories: MockInventoryRepository,
        settings: MockSettingsRepository,
    ) -> ReportingService<MockProductRepository, MockInventoryRepository, MockSettingsRepository>
    {
        ReportingService::new(Arc::new(products), Arc::new(inventories), Arc::new(settings))
    }

    #[tokio::test]
    async fn dashboard_aggregates_the_snapshot() {
        let inventory = inventory_owned_by("user_a", &[]);
        let id = inventory.id;
        let rows = vec![
            product_in(&inventory, "Empty", 0),
            product_in(&inventory, "Low", 5),
            product_in(&inventory, "Full", 10),
        ];
        let mut inventories = MockInventoryRepository::new();
        inventories
            .expect_find()
            .return_once(move |_| Ok(Some(inventory)));
        let mut products = MockProductRepository::new();
        products
            .expect_list_by_inventory()
            .return_once(move |_| Ok(rows));

        let report = service(products, inventories, MockSettingsRepository::new())
            .dashboard(&identity("user_a"), id)
            .await
            .expect("dashboard");
        assert_eq!(report.metrics.total_products, 3);
        assert_eq!(report.weekly_data.len(), 12);
        assert_eq!(report.recent_products.len(), 3);
    }

    #[tokio::test]
    async fn sharing_identity_can_read_the_dashboard() {
        let inventory = inventory_owned_by("user_a", &["friend@example.com"]);
        let id = inventory.id;
        let mut inventories = MockInventoryRepository::new();
        inventories
            .expect_find()
            .return_once(move |_| Ok(Some(inventory)));
        let mut products = MockProductRepository::new();
        products
            .expect_list_by_inventory()
            .return_once(|_| Ok(Vec::new()));

        let requester = Identity::new(
            OwnerId::new("user_b").expect("owner id"),
            [EmailAddress::new("friend@example.com").expect("email")],
        );
        let report = service(products, inventories, MockSettingsRepository::new())
            .dashboard(&requester, id)
            .await
            .expect("dashboard");
        assert_eq!(report.metrics.total_products, 0);
    }

    #[tokio::test]
    async fn stranger_is_rejected_before_any_product_read() {
        let inventory = inventory_owned_by("user_a", &[]);
        let id = inventory.id;
        let mut inventories = MockInventoryRepository::new();
        inventories
            .expect_find()
            .return_once(move |_| Ok(Some(inventory)));
        let mut products = MockProductRepository::new();
        products.expect_list_by_inventory().never();

        let err = service(products, inventories, MockSettingsRepository::new())
            .stats(&identity("user_b"), id)
            .await
            .expect_err("stranger");
        assert_eq!(err.code(), ErrorCode::Forbidden);
    }

    #[tokio::test]
    async fn export_uses_the_requesters_date_format() {
        let inventory = inventory_owned_by("user_a", &[]);
        let id = inventory.id;
        let rows = vec![product_in(&inventory, "Widget", 3)];
        let mut inventories = MockInventoryRepository::new();
        inventories
            .expect_find()
            .return_once(move |_| Ok(Some(inventory)));
        let mut products = MockProductRepository::new();
        products
            .expect_list_by_inventory()
            .return_once(move |_| Ok(rows));
        let mut settings = MockSettingsRepository::new();
        settings.expect_find_or_create_default().return_once(|owner| {
            let mut record = UserSettings::default_for(owner.clone(), Utc::now());
            record.apply_update(
                SettingsUpdate {
                    date_format: Some(DateFormat::Iso),
                    ..SettingsUpdate::default()
                },
                Utc::now(),
            );
            Ok(record)
        });

        let doc = service(products, inventories, settings)
            .export_csv(&identity("user_a"), id)
            .await
            .expect("export");
        let mut lines = doc.content.lines();
        assert_eq!(lines.next(), Some(CSV_HEADER));
        let row = lines.next().expect("data row");
        let added = row.rsplit(',').next().expect("added column");
        // ISO date: YYYY-MM-DD
        assert_eq!(added.len(), 10);
        assert_eq!(added.chars().nth(4), Some('-'));
    }
}
