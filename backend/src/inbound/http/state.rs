//! Shared application state handed to every HTTP handler.

use std::sync::Arc;

use crate::domain::ports::{InventoryOps, ProductOps, ReportingOps, SeedOps, SettingsOps};

/// Use-case handles shared across workers.
///
/// Handlers depend on the driving traits only, so endpoint tests can swap in
/// mocks without touching persistence.
#[derive(Clone)]
pub struct HttpState {
    pub inventories: Arc<dyn InventoryOps>,
    pub products: Arc<dyn ProductOps>,
    pub reporting: Arc<dyn ReportingOps>,
    pub seed: Arc<dyn SeedOps>,
    pub settings: Arc<dyn SettingsOps>,
}

impl HttpState {
    /// Bundle the use-case implementations into one state value.
    pub fn new(
        inventories: Arc<dyn InventoryOps>,
        products: Arc<dyn ProductOps>,
        reporting: Arc<dyn ReportingOps>,
        seed: Arc<dyn SeedOps>,
        settings: Arc<dyn SettingsOps>,
    ) -> Self {
        Self {
            inventories,
            products,
            reporting,
            seed,
            settings,
        }
    }
}
