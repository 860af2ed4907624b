//! Driving ports: the use-cases inbound adapters invoke.
//!
//! Request objects live here with the traits, as the transport-agnostic
//! contract between adapters and services. All identity checks happen behind
//! these traits; handlers never look at ownership themselves.

use std::collections::BTreeSet;

use async_trait::async_trait;

use crate::domain::csv_export::CsvDocument;
use crate::domain::identity::{EmailAddress, Identity};
use crate::domain::inventory::{Inventory, InventoryId};
use crate::domain::product::{Product, ProductDraft, ProductFilter, ProductId};
use crate::domain::reporting::{DashboardReport, InventoryStats};
use crate::domain::seed::SeedOutcome;
use crate::domain::settings::{SettingsUpdate, UserSettings};
use crate::domain::Result;

/// Request to create an inventory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateInventoryRequest {
    /// Required display name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
}

/// Owner-only request to update inventory metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateInventoryRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    /// Replaces the whole allow-list when present.
    pub allowed_emails: Option<BTreeSet<EmailAddress>>,
}

/// Request to create a product in an inventory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateProductRequest {
    pub inventory_id: InventoryId,
    pub draft: ProductDraft,
}

/// Full-replace update of a product's mutable fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateProductRequest {
    pub draft: ProductDraft,
}

/// Search and status filtering for product listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductListQuery {
    /// Case-insensitive name substring; empty means no search.
    pub search: Option<String>,
    /// Stock-status filter; defaults to all.
    pub filter: ProductFilter,
}

/// Partial update of user settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateSettingsRequest {
    pub update: SettingsUpdate,
}

/// Inventory lifecycle use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InventoryOps: Send + Sync {
    /// List visible inventories, lazily creating the default when none exist.
    async fn list(&self, identity: &Identity) -> Result<Vec<Inventory>>;

    /// Create an additional, never-default inventory.
    async fn create(&self, identity: &Identity, request: CreateInventoryRequest)
        -> Result<Inventory>;

    /// Owner-only metadata update.
    async fn update(
        &self,
        identity: &Identity,
        id: InventoryId,
        request: UpdateInventoryRequest,
    ) -> Result<Inventory>;

    /// Owner-only deletion with last-inventory guard and product cascade.
    async fn delete(&self, identity: &Identity, id: InventoryId) -> Result<()>;
}

/// Product CRUD use-cases, gated by inventory access.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductOps: Send + Sync {
    /// List an inventory's products with optional search and status filter.
    async fn list(
        &self,
        identity: &Identity,
        inventory_id: InventoryId,
        query: ProductListQuery,
    ) -> Result<Vec<Product>>;

    /// Fetch one product.
    async fn get(&self, identity: &Identity, id: ProductId) -> Result<Product>;

    /// Create a product in an accessible inventory.
    async fn create(&self, identity: &Identity, request: CreateProductRequest) -> Result<Product>;

    /// Replace a product's mutable fields.
    async fn update(
        &self,
        identity: &Identity,
        id: ProductId,
        request: UpdateProductRequest,
    ) -> Result<Product>;

    /// Delete one product.
    async fn delete(&self, identity: &Identity, id: ProductId) -> Result<()>;

    /// Delete the requester's own products among `ids`, returning the count.
    async fn bulk_delete(&self, identity: &Identity, ids: Vec<ProductId>) -> Result<u64>;
}

/// Read-only aggregation use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReportingOps: Send + Sync {
    /// Full dashboard for one inventory.
    async fn dashboard(
        &self,
        identity: &Identity,
        inventory_id: InventoryId,
    ) -> Result<DashboardReport>;

    /// Lightweight stats for one inventory.
    async fn stats(&self, identity: &Identity, inventory_id: InventoryId)
        -> Result<InventoryStats>;

    /// CSV export of one inventory's products.
    async fn export_csv(
        &self,
        identity: &Identity,
        inventory_id: InventoryId,
    ) -> Result<CsvDocument>;
}

/// Demo-data seeding use-case.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SeedOps: Send + Sync {
    /// Fill the caller's default inventory with the demo catalogue.
    ///
    /// Idempotent per identity: an inventory that already has products is
    /// left untouched and reported as already seeded.
    async fn seed(&self, identity: &Identity) -> Result<SeedOutcome>;
}

/// Settings use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SettingsOps: Send + Sync {
    /// Fetch settings, creating defaults on first read.
    async fn fetch(&self, identity: &Identity) -> Result<UserSettings>;

    /// Apply a partial update, creating the record when absent.
    async fn update(
        &self,
        identity: &Identity,
        request: UpdateSettingsRequest,
    ) -> Result<UserSettings>;
}
