//! CSV export of an inventory's products.
//!
//! The column layout is fixed. Only the name column is quoted; embedded
//! quotes are doubled so names containing `,` or `"` survive a round trip
//! through standard CSV parsers.

use chrono::{DateTime, Utc};

use super::product::Product;
use super::settings::DateFormat;

/// Fixed header row of every export.
pub const CSV_HEADER: &str = "Name,Price,Quantity,Low Stock At,Status,Total Value,Added";

/// A rendered CSV export with its suggested attachment name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvDocument {
    /// Suggested `inventory-YYYY-MM-DD.csv` attachment file name.
    pub filename: String,
    /// The CSV payload, newline-separated rows.
    pub content: String,
}

/// Renders product snapshots as CSV using the requester's date format.
#[derive(Debug, Clone, Copy)]
pub struct CsvExporter {
    date_format: DateFormat,
}

fn quote_name(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

impl CsvExporter {
    /// Create an exporter rendering dates with `date_format`.
    pub fn new(date_format: DateFormat) -> Self {
        Self { date_format }
    }

    /// Render `products` (most recently created first) as a CSV document.
    ///
    /// `now` is used only for the attachment file name.
    pub fn export(&self, products: &[Product], now: DateTime<Utc>) -> CsvDocument {
        let mut by_recency: Vec<&Product> = products.iter().collect();
        by_recency.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let mut lines = Vec::with_capacity(by_recency.len() + 1);
        lines.push(CSV_HEADER.to_owned());
        for product in by_recency {
            lines.push(self.render_row(product));
        }

        CsvDocument {
            filename: format!("inventory-{}.csv", now.format("%Y-%m-%d")),
            content: lines.join("\n"),
        }
    }

    fn render_row(&self, product: &Product) -> String {
        format!(
            "{},{:.2},{},{},{},{:.2},{}",
            quote_name(&product.name),
            product.price,
            product.quantity,
            product.low_stock_at,
            product.stock_status().label(),
            product.total_value(),
            self.date_format.render(product.created_at),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::identity::OwnerId;
    use crate::domain::inventory::InventoryId;
    use crate::domain::product::ProductDraft;
    use chrono::{Duration, TimeZone};
    use rust_decimal::Decimal;

    fn product(name: &str, price: Decimal, quantity: u32, created_at: DateTime<Utc>) -> Product {
        let mut product = Product::from_draft(
            OwnerId::new("user_owner").expect("owner id"),
            InventoryId::random(),
            ProductDraft::new(name, price, quantity, 5).expect("draft"),
            created_at,
        );
        product.created_at = created_at;
        product
    }

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 9, 12, 0, 0).single().expect("timestamp")
    }

    #[test]
    fn header_is_fixed() {
        let doc = CsvExporter::new(DateFormat::MonthFirst).export(&[], fixed_now());
        assert_eq!(doc.content, CSV_HEADER);
        assert_eq!(doc.filename, "inventory-2024-03-09.csv");
    }

    #[test]
    fn rows_are_newest_first_with_two_decimal_money() {
        let now = fixed_now();
        let products = vec![
            product("Older", Decimal::new(1050, 2), 2, now - Duration::days(2)),
            product("Newer", Decimal::from(3), 10, now - Duration::days(1)),
        ];

        let doc = CsvExporter::new(DateFormat::Iso).export(&products, now);
        let lines: Vec<&str> = doc.content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], CSV_HEADER);
        assert_eq!(lines[1], "\"Newer\",3.00,10,5,In Stock,30.00,2024-03-08");
        assert_eq!(lines[2], "\"Older\",10.50,2,5,Low Stock,21.00,2024-03-07");
    }

    #[test]
    fn status_column_matches_classifier() {
        let now = fixed_now();
        let products = vec![
            product("None", Decimal::ONE, 0, now - Duration::days(3)),
            product("Few", Decimal::ONE, 5, now - Duration::days(2)),
            product("Many", Decimal::ONE, 50, now - Duration::days(1)),
        ];

        let doc = CsvExporter::new(DateFormat::MonthFirst).export(&products, now);
        let statuses: Vec<&str> = doc
            .content
            .lines()
            .skip(1)
            .map(|line| line.split(',').nth(4).expect("status column"))
            .collect();
        assert_eq!(statuses, vec!["In Stock", "Low Stock", "Out of Stock"]);
    }

    #[test]
    fn names_with_commas_and_quotes_are_escaped() {
        let now = fixed_now();
        let products = vec![product(
            "Bolt, M6 \"stainless\"",
            Decimal::ONE,
            1,
            now - Duration::days(1),
        )];

        let doc = CsvExporter::new(DateFormat::MonthFirst).export(&products, now);
        let row = doc.content.lines().nth(1).expect("data row");
        assert!(row.starts_with("\"Bolt, M6 \"\"stainless\"\"\","));
    }

    #[test]
    fn row_count_matches_product_count() {
        let now = fixed_now();
        let products: Vec<Product> = (0..4)
            .map(|i| {
                product(
                    &format!("P{i}"),
                    Decimal::ONE,
                    i,
                    now - Duration::days(i64::from(i)),
                )
            })
            .collect();

        let doc = CsvExporter::new(DateFormat::DayFirst).export(&products, now);
        assert_eq!(doc.content.lines().count(), products.len() + 1);
    }
}
