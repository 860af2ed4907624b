//! Dashboard aggregation over a product snapshot.
//!
//! Everything here is pure: callers pass the product set and the reference
//! instant, making the histogram and recency views deterministic under test.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use super::product::Product;
use super::stock::StockStatus;

/// Number of whole weeks covered by the creation histogram.
pub const HISTOGRAM_WEEKS: i64 = 12;
/// Number of products shown in the recent-products view.
pub const RECENT_PRODUCT_LIMIT: usize = 5;

/// Headline counts and value for one inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InventoryMetrics {
    /// Number of products in the inventory.
    pub total_products: u64,
    /// Sum of `price × quantity`, unrounded.
    pub total_value: Decimal,
    /// Products above their low-stock threshold.
    pub in_stock: u64,
    /// Products at or below their threshold but not empty.
    pub low_stock: u64,
    /// Products with zero quantity.
    pub out_of_stock: u64,
}

/// Per-category share of products, rounded independently.
///
/// Because each percentage rounds on its own, the three may sum to 99 or 101;
/// that is the documented behaviour, not a defect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Efficiency {
    pub in_stock_percent: u8,
    pub low_stock_percent: u8,
    pub out_of_stock_percent: u8,
}

/// One labelled histogram bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WeekBucket {
    /// Sequential label, `W1` (oldest) through `W12` (youngest).
    pub week: String,
    /// Products created within the bucket's half-open interval.
    pub products: u64,
}

/// A recent product annotated with its derived status, for display only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecentProduct {
    pub name: String,
    pub quantity: u32,
    pub low_stock_at: u32,
    pub status: StockStatus,
}

/// Full dashboard payload for one inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardReport {
    pub metrics: InventoryMetrics,
    pub weekly_data: Vec<WeekBucket>,
    pub recent_products: Vec<RecentProduct>,
    pub efficiency: Efficiency,
}

/// Lightweight stats payload: totals plus the two alert counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InventoryStats {
    pub total_products: u64,
    pub total_value: Decimal,
    pub low_stock_count: u64,
    pub out_of_stock_count: u64,
}

/// Integer percentage of `part` in `total`, rounding half up.
///
/// Defined as 0 when `total` is 0 so an empty inventory reports 0% across
/// the board instead of propagating a division by zero.
fn percent_of(part: u64, total: u64) -> u8 {
    if total == 0 {
        return 0;
    }
    // Round half up without floating point: floor((200·part + total) / 2·total).
    let rounded = (part * 200 + total) / (total * 2);
    u8::try_from(rounded).unwrap_or(u8::MAX)
}

fn tally(products: &[Product]) -> InventoryMetrics {
    let total_products = products.len() as u64;
    let total_value: Decimal = products.iter().map(Product::total_value).sum();
    let low_stock = products
        .iter()
        .filter(|p| p.stock_status() == StockStatus::LowStock)
        .count() as u64;
    let out_of_stock = products
        .iter()
        .filter(|p| p.stock_status() == StockStatus::OutOfStock)
        .count() as u64;

    InventoryMetrics {
        total_products,
        total_value,
        // Derived by subtraction so the three counts always sum to the total.
        in_stock: total_products - low_stock - out_of_stock,
        low_stock,
        out_of_stock,
    }
}

/// Bucket product creation times into the last [`HISTOGRAM_WEEKS`] whole weeks.
///
/// Bucket `i` (counting 11 down to 0) covers `[now − (i+1)·7d, now − i·7d)`;
/// buckets are returned oldest first and labelled `W1..W12`. Products created
/// before the window are silently excluded.
pub fn weekly_histogram(products: &[Product], now: DateTime<Utc>) -> Vec<WeekBucket> {
    (0..HISTOGRAM_WEEKS)
        .rev()
        .map(|i| {
            let start = now - Duration::days((i + 1) * 7);
            let end = now - Duration::days(i * 7);
            let count = products
                .iter()
                .filter(|p| p.created_at >= start && p.created_at < end)
                .count() as u64;
            WeekBucket {
                week: format!("W{}", HISTOGRAM_WEEKS - i),
                products: count,
            }
        })
        .collect()
}

fn recent_products(products: &[Product]) -> Vec<RecentProduct> {
    let mut by_recency: Vec<&Product> = products.iter().collect();
    by_recency.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    by_recency
        .into_iter()
        .take(RECENT_PRODUCT_LIMIT)
        .map(|p| RecentProduct {
            name: p.name.clone(),
            quantity: p.quantity,
            low_stock_at: p.low_stock_at,
            status: p.stock_status(),
        })
        .collect()
}

impl DashboardReport {
    /// Compute the full dashboard from a product snapshot at instant `now`.
    pub fn build(products: &[Product], now: DateTime<Utc>) -> Self {
        let metrics = tally(products);
        let efficiency = Efficiency {
            in_stock_percent: percent_of(metrics.in_stock, metrics.total_products),
            low_stock_percent: percent_of(metrics.low_stock, metrics.total_products),
            out_of_stock_percent: percent_of(metrics.out_of_stock, metrics.total_products),
        };
        Self {
            weekly_data: weekly_histogram(products, now),
            recent_products: recent_products(products),
            metrics,
            efficiency,
        }
    }
}

impl InventoryStats {
    /// Compute the lightweight stats from a product snapshot.
    pub fn build(products: &[Product]) -> Self {
        let metrics = tally(products);
        Self {
            total_products: metrics.total_products,
            total_value: metrics.total_value,
            low_stock_count: metrics.low_stock,
            out_of_stock_count: metrics.out_of_stock,
        }
    }
}
