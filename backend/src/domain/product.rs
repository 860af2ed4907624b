//! Product entity and listing filters.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::identity::OwnerId;
use super::inventory::InventoryId;
use super::stock::StockStatus;

/// Opaque product identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(Uuid);

impl ProductId {
    /// Generate a fresh random id.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an id from its canonical string form.
    pub fn parse(raw: &str) -> Result<Self, uuid::Error> {
        Uuid::parse_str(raw).map(Self)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Validation errors for product fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductValidationError {
    EmptyName,
    NegativePrice,
}

impl fmt::Display for ProductValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "product name must not be empty"),
            Self::NegativePrice => write!(f, "price must not be negative"),
        }
    }
}

impl std::error::Error for ProductValidationError {}

/// Validated mutable fields of a product.
///
/// Shared between creation and full-replace updates, mirroring the write
/// surface of the product API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDraft {
    pub name: String,
    pub price: Decimal,
    pub quantity: u32,
    pub low_stock_at: u32,
}

impl ProductDraft {
    /// Validate the mutable product fields.
    ///
    /// Quantity and threshold arrive as unsigned integers, so only the name
    /// and price need checking here.
    pub fn new(
        name: &str,
        price: Decimal,
        quantity: u32,
        low_stock_at: u32,
    ) -> Result<Self, ProductValidationError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(ProductValidationError::EmptyName);
        }
        if price.is_sign_negative() && !price.is_zero() {
            return Err(ProductValidationError::NegativePrice);
        }
        Ok(Self {
            name: trimmed.to_owned(),
            price,
            quantity,
            low_stock_at,
        })
    }
}

/// A stocked product belonging to exactly one inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Stable identifier.
    pub id: ProductId,
    /// The identity that created this product.
    pub owner_id: OwnerId,
    /// The inventory this product belongs to.
    pub inventory_id: InventoryId,
    /// Display name, trimmed and non-empty.
    pub name: String,
    /// Unit price, never negative.
    pub price: Decimal,
    /// Units on hand.
    pub quantity: u32,
    /// Threshold at or below which (and above zero) stock is low.
    pub low_stock_at: u32,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Create a product from a validated draft.
    pub fn from_draft(
        owner_id: OwnerId,
        inventory_id: InventoryId,
        draft: ProductDraft,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: ProductId::random(),
            owner_id,
            inventory_id,
            name: draft.name,
            price: draft.price,
            quantity: draft.quantity,
            low_stock_at: draft.low_stock_at,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the mutable fields from a validated draft.
    pub fn apply_draft(&mut self, draft: ProductDraft, now: DateTime<Utc>) {
        self.name = draft.name;
        self.price = draft.price;
        self.quantity = draft.quantity;
        self.low_stock_at = draft.low_stock_at;
        self.updated_at = now;
    }

    /// Current stock status, always derived, never stored.
    pub fn stock_status(&self) -> StockStatus {
        StockStatus::classify(self.quantity, self.low_stock_at)
    }

    /// Monetary value of the units on hand (`price × quantity`).
    pub fn total_value(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }

    /// Case-insensitive name substring match used by the listing search.
    pub fn name_matches(&self, query: &str) -> bool {
        self.name.to_lowercase().contains(&query.to_lowercase())
    }
}

/// Stock-status filter accepted by the product listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProductFilter {
    /// No status filtering.
    #[default]
    All,
    InStock,
    LowStock,
    OutOfStock,
}

/// Error returned when parsing an unknown filter string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseProductFilterError {
    /// The unrecognised input value.
    pub input: String,
}

impl fmt::Display for ParseProductFilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown product filter: {}", self.input)
    }
}

impl std::error::Error for ParseProductFilterError {}

impl FromStr for ProductFilter {
    type Err = ParseProductFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "in-stock" => Ok(Self::InStock),
            "low-stock" => Ok(Self::LowStock),
            "out-of-stock" => Ok(Self::OutOfStock),
            _ => Err(ParseProductFilterError {
                input: s.to_owned(),
            }),
        }
    }
}

impl ProductFilter {
    /// Whether `product` passes this filter.
    pub fn accepts(self, product: &Product) -> bool {
        match self {
            Self::All => true,
            Self::InStock => product.stock_status() == StockStatus::InStock,
            Self::LowStock => product.stock_status() == StockStatus::LowStock,
            Self::OutOfStock => product.stock_status() == StockStatus::OutOfStock,
        }
    }
}
