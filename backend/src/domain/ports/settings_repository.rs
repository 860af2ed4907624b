//! Port for user settings persistence.

use async_trait::async_trait;

use crate::domain::identity::OwnerId;
use crate::domain::settings::UserSettings;

use super::StorageError;

/// Port for the one-record-per-identity settings store.
///
/// [`find_or_create_default`](Self::find_or_create_default) is atomic in the
/// same sense as the inventory default: concurrent first reads for one
/// identity yield a single record.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// Fetch settings for an identity, if any have been saved.
    async fn find(&self, owner: &OwnerId) -> Result<Option<UserSettings>, StorageError>;

    /// Fetch settings, atomically creating the defaults when absent.
    async fn find_or_create_default(&self, owner: &OwnerId)
        -> Result<UserSettings, StorageError>;

    /// Insert or replace the settings record for its owner.
    async fn upsert(&self, settings: &UserSettings) -> Result<(), StorageError>;
}
