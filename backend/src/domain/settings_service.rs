//! User settings service: lazy defaults on read, partial upsert on write.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::identity::Identity;
use crate::domain::ports::{SettingsOps, SettingsRepository, UpdateSettingsRequest};
use crate::domain::settings::UserSettings;
use crate::domain::Result;

/// Settings service over a [`SettingsRepository`].
#[derive(Clone)]
pub struct SettingsService<S> {
    settings: Arc<S>,
}

impl<S> SettingsService<S> {
    /// Create a new service with the given repository.
    pub fn new(settings: Arc<S>) -> Self {
        Self { settings }
    }
}

#[async_trait]
impl<S> SettingsOps for SettingsService<S>
where
    S: SettingsRepository,
{
    async fn fetch(&self, identity: &Identity) -> Result<UserSettings> {
        Ok(self
            .settings
            .find_or_create_default(identity.owner_id())
            .await?)
    }

    async fn update(
        &self,
        identity: &Identity,
        request: UpdateSettingsRequest,
    ) -> Result<UserSettings> {
        let now = Utc::now();
        let mut settings = match self.settings.find(identity.owner_id()).await? {
            Some(existing) => existing,
            None => UserSettings::default_for(identity.owner_id().clone(), now),
        };
        settings.apply_update(request.update, now);
        self.settings.upsert(&settings).await?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::identity::OwnerId;
    use crate::domain::ports::MockSettingsRepository;
    use crate::domain::settings::{ChartType, Currency, DateFormat, SettingsUpdate};

    fn identity(owner: &str) -> Identity {
        Identity::new(OwnerId::new(owner).expect("owner id"), [])
    }

    #[tokio::test]
    async fn fetch_delegates_to_the_atomic_default_read() {
        let mut repo = MockSettingsRepository::new();
        repo.expect_find_or_create_default()
            .return_once(|owner| Ok(UserSettings::default_for(owner.clone(), Utc::now())));

        let settings = SettingsService::new(Arc::new(repo))
            .fetch(&identity("user_a"))
            .await
            .expect("fetch");
        assert_eq!(settings.currency, Currency::Dollar);
    }

    #[tokio::test]
    async fn update_without_existing_record_starts_from_defaults() {
        let mut repo = MockSettingsRepository::new();
        repo.expect_find().return_once(|_| Ok(None));
        repo.expect_upsert()
            .withf(|settings: &UserSettings| {
                settings.chart_type == ChartType::Area
                    && settings.currency == Currency::Dollar
            })
            .return_once(|_| Ok(()));

        let settings = SettingsService::new(Arc::new(repo))
            .update(
                &identity("user_a"),
                UpdateSettingsRequest {
                    update: SettingsUpdate {
                        chart_type: Some(ChartType::Area),
                        ..SettingsUpdate::default()
                    },
                },
            )
            .await
            .expect("update");
        assert_eq!(settings.chart_type, ChartType::Area);
    }

    #[tokio::test]
    async fn partial_update_preserves_existing_choices() {
        let owner = OwnerId::new("user_a").expect("owner id");
        let mut existing = UserSettings::default_for(owner, Utc::now());
        existing.apply_update(
            SettingsUpdate {
                currency: Some(Currency::Euro),
                ..SettingsUpdate::default()
            },
            Utc::now(),
        );

        let mut repo = MockSettingsRepository::new();
        repo.expect_find().return_once(move |_| Ok(Some(existing)));
        repo.expect_upsert().return_once(|_| Ok(()));

        let settings = SettingsService::new(Arc::new(repo))
            .update(
                &identity("user_a"),
                UpdateSettingsRequest {
                    update: SettingsUpdate {
                        date_format: Some(DateFormat::DayFirst),
                        ..SettingsUpdate::default()
                    },
                },
            )
            .await
            .expect("update");
        assert_eq!(settings.currency, Currency::Euro);
        assert_eq!(settings.date_format, DateFormat::DayFirst);
    }
}
