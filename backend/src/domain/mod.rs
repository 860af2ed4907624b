//! Domain entities, pure computation, and services.
//!
//! Everything in this module is transport and storage agnostic: inbound
//! adapters translate requests into calls on the driving ports in
//! [`ports`], and persistence adapters implement the driven ports. The
//! requesting [`Identity`] is threaded explicitly through every operation;
//! there is no ambient current user or active inventory.

pub mod access;
pub mod csv_export;
pub mod error;
pub mod identity;
pub mod inventory;
pub mod ports;
pub mod product;
pub mod reporting;
pub mod seed;
pub mod settings;
pub mod stock;

mod inventory_service;
mod product_service;
mod reporting_service;
mod seed_service;
mod settings_service;

pub use self::csv_export::{CsvDocument, CsvExporter, CSV_HEADER};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::identity::{EmailAddress, Identity, IdentityValidationError, OwnerId};
pub use self::inventory::{
    Inventory, InventoryId, InventoryUpdate, DEFAULT_INVENTORY_NAME,
};
pub use self::inventory_service::InventoryService;
pub use self::product::{Product, ProductDraft, ProductFilter, ProductId};
pub use self::product_service::ProductService;
pub use self::reporting::{
    DashboardReport, Efficiency, InventoryMetrics, InventoryStats, RecentProduct, WeekBucket,
};
pub use self::reporting_service::ReportingService;
pub use self::seed::SeedOutcome;
pub use self::seed_service::SeedService;
pub use self::settings::{ChartType, Currency, DateFormat, SettingsUpdate, UserSettings};
pub use self::settings_service::SettingsService;
pub use self::stock::StockStatus;

/// Convenient domain result alias.
pub type Result<T> = std::result::Result<T, Error>;
