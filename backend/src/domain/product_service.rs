//! Product CRUD service, gated by inventory access.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::info;

use crate::domain::access;
use crate::domain::identity::Identity;
use crate::domain::inventory::{Inventory, InventoryId};
use crate::domain::ports::{
    CreateProductRequest, InventoryRepository, ProductListQuery, ProductOps, ProductRepository,
    UpdateProductRequest,
};
use crate::domain::product::{Product, ProductId};
use crate::domain::{Error, Result};

/// Product service over product and inventory repositories.
///
/// The inventory repository is consulted for every operation because access
/// is a property of the owning inventory, not of the product row.
#[derive(Clone)]
pub struct ProductService<P, I> {
    products: Arc<P>,
    inventories: Arc<I>,
}

impl<P, I> ProductService<P, I> {
    /// Create a new service with the given repositories.
    pub fn new(products: Arc<P>, inventories: Arc<I>) -> Self {
        Self {
            products,
            inventories,
        }
    }
}

impl<P, I> ProductService<P, I>
where
    P: ProductRepository,
    I: InventoryRepository,
{
    async fn accessible_inventory(
        &self,
        identity: &Identity,
        inventory_id: InventoryId,
    ) -> Result<Inventory> {
        let inventory = self
            .inventories
            .find(inventory_id)
            .await?
            .ok_or_else(|| Error::not_found("inventory not found"))?;
        access::ensure_can_use(identity, &inventory)?;
        Ok(inventory)
    }

    async fn accessible_product(
        &self,
        identity: &Identity,
        id: ProductId,
    ) -> Result<Product> {
        let product = self
            .products
            .find(id)
            .await?
            .ok_or_else(|| Error::not_found("product not found"))?;
        self.accessible_inventory(identity, product.inventory_id)
            .await?;
        Ok(product)
    }
}

#[async_trait]
impl<P, I> ProductOps for ProductService<P, I>
where
    P: ProductRepository,
    I: InventoryRepository,
{
    async fn list(
        &self,
        identity: &Identity,
        inventory_id: InventoryId,
        query: ProductListQuery,
    ) -> Result<Vec<Product>> {
        self.accessible_inventory(identity, inventory_id).await?;
        let products = self.products.list_by_inventory(inventory_id).await?;

        let search = query.search.as_deref().unwrap_or("").trim().to_owned();
        Ok(products
            .into_iter()
            .filter(|product| search.is_empty() || product.name_matches(&search))
            .filter(|product| query.filter.accepts(product))
            .collect())
    }

    async fn get(&self, identity: &Identity, id: ProductId) -> Result<Product> {
        self.accessible_product(identity, id).await
    }

    async fn create(&self, identity: &Identity, request: CreateProductRequest) -> Result<Product> {
        self.accessible_inventory(identity, request.inventory_id)
            .await?;

        let product = Product::from_draft(
            identity.owner_id().clone(),
            request.inventory_id,
            request.draft,
            Utc::now(),
        );
        self.products.insert(&product).await?;
        Ok(product)
    }

    async fn update(
        &self,
        identity: &Identity,
        id: ProductId,
        request: UpdateProductRequest,
    ) -> Result<Product> {
        let mut product = self.accessible_product(identity, id).await?;
        product.apply_draft(request.draft, Utc::now());
        self.products.update(&product).await?;
        Ok(product)
    }

    async fn delete(&self, identity: &Identity, id: ProductId) -> Result<()> {
        let product = self.accessible_product(identity, id).await?;
        if !self.products.delete(product.id).await? {
            // Gone between the access check and the delete; treat as deleted.
            info!(product = %id, "product vanished before delete");
        }
        Ok(())
    }

    async fn bulk_delete(&self, identity: &Identity, ids: Vec<ProductId>) -> Result<u64> {
        if ids.is_empty() {
            return Err(Error::invalid_request("at least one product id is required"));
        }
        let deleted = self.products.delete_owned(identity.owner_id(), &ids).await?;
        info!(owner = %identity.owner_id(), requested = ids.len(), deleted, "bulk deleted products");
        Ok(deleted)
    }
}
