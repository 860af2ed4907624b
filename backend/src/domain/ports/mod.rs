//! Domain ports.
//!
//! Driven ports (`*Repository`) are implemented by persistence adapters;
//! driving ports (`*Ops`) are implemented by domain services and consumed by
//! inbound adapters. Handlers depend only on the driving traits, so endpoint
//! tests can mock a whole use-case in one line.

mod inventory_repository;
mod ops;
mod product_repository;
mod settings_repository;

pub use inventory_repository::InventoryRepository;
pub use ops::{
    CreateInventoryRequest, CreateProductRequest, InventoryOps, ProductOps, ProductListQuery,
    ReportingOps, SeedOps, SettingsOps, UpdateInventoryRequest, UpdateProductRequest,
    UpdateSettingsRequest,
};
pub use product_repository::ProductRepository;
pub use settings_repository::SettingsRepository;

#[cfg(test)]
pub use inventory_repository::MockInventoryRepository;
#[cfg(test)]
pub use ops::{
    MockInventoryOps, MockProductOps, MockReportingOps, MockSeedOps, MockSettingsOps,
};
#[cfg(test)]
pub use product_repository::MockProductRepository;
#[cfg(test)]
pub use settings_repository::MockSettingsRepository;

use crate::domain::Error;

/// Errors raised by storage adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    /// The store could not be reached.
    #[error("storage unavailable: {message}")]
    Unavailable { message: String },
    /// A query or mutation failed during execution.
    #[error("storage query failed: {message}")]
    Query { message: String },
}

impl StorageError {
    /// Construct an [`StorageError::Unavailable`].
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Construct a [`StorageError::Query`].
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

impl From<StorageError> for Error {
    fn from(error: StorageError) -> Self {
        match error {
            StorageError::Unavailable { message } => {
                Self::service_unavailable(format!("storage unavailable: {message}"))
            }
            StorageError::Query { message } => {
                Self::internal(format!("storage query failed: {message}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;

    #[test]
    fn unavailable_maps_to_service_unavailable() {
        let err: Error = StorageError::unavailable("lock poisoned").into();
        assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
    }

    #[test]
    fn query_failures_map_to_internal() {
        let err: Error = StorageError::query("row vanished").into();
        assert_eq!(err.code(), ErrorCode::InternalError);
        assert!(err.message().contains("row vanished"));
    }
}
