//! Stock status classification.
//!
//! The classification is total and pure: zero quantity is always out of
//! stock, and the low-stock threshold comparison is inclusive, so a product
//! with `quantity == low_stock_at` is low stock rather than in stock.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Derived stock status of a product. Never persisted; always recomputed.
///
/// # Examples
///
/// ```
/// use backend::domain::StockStatus;
///
/// assert_eq!(StockStatus::classify(0, 5), StockStatus::OutOfStock);
/// assert_eq!(StockStatus::classify(5, 5), StockStatus::LowStock);
/// assert_eq!(StockStatus::classify(6, 5), StockStatus::InStock);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    /// No units on hand.
    OutOfStock,
    /// Some units, at or below the low-stock threshold.
    LowStock,
    /// More units than the low-stock threshold.
    InStock,
}

impl StockStatus {
    /// Classify a quantity against a low-stock threshold.
    ///
    /// Order matters: the zero check comes first, so `classify(0, 0)` is
    /// `OutOfStock` even though `0 <= 0`.
    pub fn classify(quantity: u32, low_stock_at: u32) -> Self {
        if quantity == 0 {
            Self::OutOfStock
        } else if quantity <= low_stock_at {
            Self::LowStock
        } else {
            Self::InStock
        }
    }

    /// Human-readable label used by CSV export and dashboards.
    pub fn label(self) -> &'static str {
        match self {
            Self::OutOfStock => "Out of Stock",
            Self::LowStock => "Low Stock",
            Self::InStock => "In Stock",
        }
    }
}

impl std::fmt::Display for StockStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
