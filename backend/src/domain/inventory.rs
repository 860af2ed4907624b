//! Inventory aggregate.
//!
//! An inventory is a named collection of products owned by one identity and
//! optionally shared with others through an email allow-list. The first
//! inventory an identity sees is created lazily with [`Inventory::default_for`].

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::identity::{EmailAddress, OwnerId};

/// Name given to the lazily created first inventory.
pub const DEFAULT_INVENTORY_NAME: &str = "Main Inventory";
/// Description given to the lazily created first inventory.
pub const DEFAULT_INVENTORY_DESCRIPTION: &str = "Default inventory";

/// Opaque inventory identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InventoryId(Uuid);

impl InventoryId {
    /// Generate a fresh random id.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an id from its canonical string form.
    pub fn parse(raw: &str) -> Result<Self, uuid::Error> {
        Uuid::parse_str(raw).map(Self)
    }
}

impl fmt::Display for InventoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Validation errors for inventory fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InventoryValidationError {
    EmptyName,
}

impl fmt::Display for InventoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "inventory name must not be empty"),
        }
    }
}

impl std::error::Error for InventoryValidationError {}

fn validate_name(name: &str) -> Result<String, InventoryValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(InventoryValidationError::EmptyName);
    }
    Ok(trimmed.to_owned())
}

/// A named collection of products owned by one identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Inventory {
    /// Stable identifier.
    pub id: InventoryId,
    /// The identity that owns this inventory.
    pub owner_id: OwnerId,
    /// Display name, trimmed and non-empty.
    pub name: String,
    /// Free-form description; may be empty.
    pub description: String,
    /// Whether this is the lazily created first inventory.
    pub is_default: bool,
    /// Emails granted product-level access; order is irrelevant.
    pub allowed_emails: BTreeSet<EmailAddress>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Owner-supplied changes to inventory metadata.
///
/// `None` fields are left untouched; `allowed_emails` replaces the whole
/// allow-list when present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InventoryUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub allowed_emails: Option<BTreeSet<EmailAddress>>,
}

impl Inventory {
    /// Create a new, never-default inventory for `owner_id`.
    pub fn new(
        owner_id: OwnerId,
        name: &str,
        description: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<Self, InventoryValidationError> {
        Ok(Self {
            id: InventoryId::random(),
            owner_id,
            name: validate_name(name)?,
            description: description.unwrap_or("").trim().to_owned(),
            is_default: false,
            allowed_emails: BTreeSet::new(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Create the default "Main Inventory" for an identity with none.
    pub fn default_for(owner_id: OwnerId, now: DateTime<Utc>) -> Self {
        Self {
            id: InventoryId::random(),
            owner_id,
            name: DEFAULT_INVENTORY_NAME.to_owned(),
            description: DEFAULT_INVENTORY_DESCRIPTION.to_owned(),
            is_default: true,
            allowed_emails: BTreeSet::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply an owner-authorised metadata update in place.
    pub fn apply_update(
        &mut self,
        update: InventoryUpdate,
        now: DateTime<Utc>,
    ) -> Result<(), InventoryValidationError> {
        if let Some(name) = update.name {
            self.name = validate_name(&name)?;
        }
        if let Some(description) = update.description {
            self.description = description.trim().to_owned();
        }
        if let Some(allowed_emails) = update.allowed_emails {
            self.allowed_emails = allowed_emails;
        }
        self.updated_at = now;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn owner() -> OwnerId {
        OwnerId::new("user_owner").expect("owner id")
    }

    #[test]
    fn new_trims_name_and_description() {
        let inventory = Inventory::new(owner(), "  Warehouse A ", Some(" main site "), Utc::now())
            .expect("valid inventory");
        assert_eq!(inventory.name, "Warehouse A");
        assert_eq!(inventory.description, "main site");
        assert!(!inventory.is_default);
        assert!(inventory.allowed_emails.is_empty());
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn new_rejects_blank_names(#[case] name: &str) {
        let result = Inventory::new(owner(), name, None, Utc::now());
        assert_eq!(result.expect_err("blank name"), InventoryValidationError::EmptyName);
    }

    #[test]
    fn default_inventory_is_flagged_and_named() {
        let inventory = Inventory::default_for(owner(), Utc::now());
        assert!(inventory.is_default);
        assert_eq!(inventory.name, DEFAULT_INVENTORY_NAME);
        assert_eq!(inventory.description, DEFAULT_INVENTORY_DESCRIPTION);
    }

    #[test]
    fn apply_update_touches_only_provided_fields() {
        let created = Utc::now();
        let mut inventory =
            Inventory::new(owner(), "Shop", Some("original"), created).expect("inventory");
        let later = created + chrono::Duration::seconds(5);

        inventory
            .apply_update(
                InventoryUpdate {
                    name: Some("Shop Floor".to_owned()),
                    description: None,
                    allowed_emails: None,
                },
                later,
            )
            .expect("update");

        assert_eq!(inventory.name, "Shop Floor");
        assert_eq!(inventory.description, "original");
        assert_eq!(inventory.updated_at, later);
        assert_eq!(inventory.created_at, created);
    }

    #[test]
    fn apply_update_replaces_allow_list_wholesale() {
        let mut inventory = Inventory::new(owner(), "Shop", None, Utc::now()).expect("inventory");
        let emails: BTreeSet<_> = [EmailAddress::new("a@b.io").expect("email")]
            .into_iter()
            .collect();

        inventory
            .apply_update(
                InventoryUpdate {
                    allowed_emails: Some(emails.clone()),
                    ..InventoryUpdate::default()
                },
                Utc::now(),
            )
            .expect("update");
        assert_eq!(inventory.allowed_emails, emails);

        inventory
            .apply_update(
                InventoryUpdate {
                    allowed_emails: Some(BTreeSet::new()),
                    ..InventoryUpdate::default()
                },
                Utc::now(),
            )
            .expect("update");
        assert!(inventory.allowed_emails.is_empty());
    }

    #[test]
    fn apply_update_rejects_blank_replacement_name() {
        let mut inventory = Inventory::new(owner(), "Shop", None, Utc::now()).expect("inventory");
        let result = inventory.apply_update(
            InventoryUpdate {
                name: Some("  ".to_owned()),
                ..InventoryUpdate::default()
            },
            Utc::now(),
        );
        assert!(result.is_err());
        assert_eq!(inventory.name, "Shop");
    }
}
