//! Demo product catalogue for first-run seeding.
//!
//! The catalogue is fixed: 25 products with creation dates spread across the
//! last twelve weeks so a freshly seeded dashboard shows a populated
//! histogram, and a mix of stocked, low and empty quantities so every status
//! category is represented.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;

use super::identity::OwnerId;
use super::inventory::InventoryId;
use super::product::{Product, ProductId};

/// Result of a seed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The catalogue was written; `count` products now exist.
    Seeded { count: u64 },
    /// The inventory already had products; nothing was written.
    AlreadySeeded { count: u64 },
}

struct DemoProduct {
    name: &'static str,
    price_cents: i64,
    quantity: u32,
    low_stock_at: u32,
    age_days: i64,
}

const CATALOGUE: [DemoProduct; 25] = [
    DemoProduct { name: "Laptop Dell XPS 15", price_cents: 189_999, quantity: 25, low_stock_at: 5, age_days: 80 },
    DemoProduct { name: "Mouse Logitech MX Master", price_cents: 9_999, quantity: 150, low_stock_at: 20, age_days: 75 },
    DemoProduct { name: "Keyboard Mechanical RGB", price_cents: 14_999, quantity: 8, low_stock_at: 10, age_days: 70 },
    DemoProduct { name: "Monitor 27\" 4K", price_cents: 49_999, quantity: 12, low_stock_at: 3, age_days: 65 },
    DemoProduct { name: "USB-C Cable 2m", price_cents: 1_999, quantity: 200, low_stock_at: 50, age_days: 60 },
    DemoProduct { name: "Webcam HD 1080p", price_cents: 7_999, quantity: 45, low_stock_at: 10, age_days: 56 },
    DemoProduct { name: "Headphones Sony WH-1000XM5", price_cents: 39_999, quantity: 30, low_stock_at: 8, age_days: 52 },
    DemoProduct { name: "SSD Samsung 1TB", price_cents: 12_999, quantity: 60, low_stock_at: 15, age_days: 48 },
    DemoProduct { name: "RAM DDR5 32GB", price_cents: 18_999, quantity: 18, low_stock_at: 5, age_days: 44 },
    DemoProduct { name: "Graphics Card RTX 4070", price_cents: 59_999, quantity: 0, low_stock_at: 2, age_days: 40 },
    DemoProduct { name: "Power Supply 750W", price_cents: 11_999, quantity: 22, low_stock_at: 5, age_days: 36 },
    DemoProduct { name: "Cooling Fan RGB", price_cents: 3_999, quantity: 95, low_stock_at: 20, age_days: 32 },
    DemoProduct { name: "MacBook Pro M3", price_cents: 249_999, quantity: 15, low_stock_at: 3, age_days: 28 },
    DemoProduct { name: "iPad Air 11\"", price_cents: 79_999, quantity: 0, low_stock_at: 5, age_days: 24 },
    DemoProduct { name: "AirPods Pro 2", price_cents: 24_999, quantity: 75, low_stock_at: 15, age_days: 21 },
    DemoProduct { name: "Magic Mouse", price_cents: 7_999, quantity: 4, low_stock_at: 10, age_days: 18 },
    DemoProduct { name: "Thunderbolt Cable", price_cents: 3_999, quantity: 120, low_stock_at: 30, age_days: 16 },
    DemoProduct { name: "External SSD 2TB", price_cents: 24_999, quantity: 35, low_stock_at: 8, age_days: 14 },
    DemoProduct { name: "Wireless Charger", price_cents: 4_999, quantity: 88, low_stock_at: 20, age_days: 12 },
    DemoProduct { name: "Laptop Stand Aluminum", price_cents: 5_999, quantity: 42, low_stock_at: 10, age_days: 10 },
    DemoProduct { name: "USB Hub 7-Port", price_cents: 3_499, quantity: 3, low_stock_at: 15, age_days: 8 },
    DemoProduct { name: "Blue Yeti Microphone", price_cents: 12_999, quantity: 16, low_stock_at: 5, age_days: 6 },
    DemoProduct { name: "Ring Light", price_cents: 4_599, quantity: 52, low_stock_at: 12, age_days: 4 },
    DemoProduct { name: "Desk Mat XXL", price_cents: 2_999, quantity: 0, low_stock_at: 10, age_days: 2 },
    DemoProduct { name: "Ergonomic Chair", price_cents: 34_999, quantity: 8, low_stock_at: 3, age_days: 1 },
];

/// Materialise the demo catalogue for one owner and inventory.
///
/// Each product is backdated by its catalogue age relative to `now`.
pub fn demo_products(
    owner: &OwnerId,
    inventory_id: InventoryId,
    now: DateTime<Utc>,
) -> Vec<Product> {
    CATALOGUE
        .iter()
        .map(|entry| {
            let created_at = now - Duration::days(entry.age_days);
            Product {
                id: ProductId::random(),
                owner_id: owner.clone(),
                inventory_id,
                name: entry.name.to_owned(),
                price: Decimal::new(entry.price_cents, 2),
                quantity: entry.quantity,
                low_stock_at: entry.low_stock_at,
                created_at,
                updated_at: created_at,
            }
        })
        .collect()
}
