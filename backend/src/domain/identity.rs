//! Requesting identity: owner id plus verified email addresses.
//!
//! Owner ids are opaque strings minted by the external identity provider, so
//! they are validated for shape (non-empty, no surrounding whitespace) rather
//! than parsed. Email addresses are normalised to lowercase so allow-list
//! comparisons are case-insensitive.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Validation errors for identity components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityValidationError {
    EmptyOwnerId,
    PaddedOwnerId,
    InvalidEmail { input: String },
}

impl fmt::Display for IdentityValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyOwnerId => write!(f, "owner id must not be empty"),
            Self::PaddedOwnerId => write!(f, "owner id must not contain surrounding whitespace"),
            Self::InvalidEmail { input } => write!(f, "invalid email address: {input}"),
        }
    }
}

impl std::error::Error for IdentityValidationError {}

/// Opaque identifier for the identity that owns a record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OwnerId(String);

impl OwnerId {
    /// Validate and construct an [`OwnerId`].
    pub fn new(id: impl Into<String>) -> Result<Self, IdentityValidationError> {
        let id = id.into();
        if id.is_empty() {
            return Err(IdentityValidationError::EmptyOwnerId);
        }
        if id.trim() != id {
            return Err(IdentityValidationError::PaddedOwnerId);
        }
        Ok(Self(id))
    }
}

impl AsRef<str> for OwnerId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<OwnerId> for String {
    fn from(value: OwnerId) -> Self {
        value.0
    }
}

impl TryFrom<String> for OwnerId {
    type Error = IdentityValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// A verified email address, normalised to lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate, trim, and lowercase an email address.
    ///
    /// Deliverability is the identity provider's concern; this only rejects
    /// values that cannot possibly be addresses.
    pub fn new(address: impl AsRef<str>) -> Result<Self, IdentityValidationError> {
        let trimmed = address.as_ref().trim();
        let invalid = || IdentityValidationError::InvalidEmail {
            input: address.as_ref().to_owned(),
        };
        let (local, domain) = trimmed.split_once('@').ok_or_else(invalid)?;
        if local.is_empty() || domain.is_empty() || domain.contains('@') {
            return Err(invalid());
        }
        Ok(Self(trimmed.to_lowercase()))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = IdentityValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// The authenticated caller of a request: owner id plus verified emails.
///
/// Produced once per request by the inbound auth extractor and threaded
/// explicitly through every domain call; there is no ambient current user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    owner_id: OwnerId,
    emails: BTreeSet<EmailAddress>,
}

impl Identity {
    /// Construct an identity from its verified components.
    pub fn new(owner_id: OwnerId, emails: impl IntoIterator<Item = EmailAddress>) -> Self {
        Self {
            owner_id,
            emails: emails.into_iter().collect(),
        }
    }

    /// The opaque owner id.
    pub fn owner_id(&self) -> &OwnerId {
        &self.owner_id
    }

    /// The verified email addresses associated with this identity.
    pub fn emails(&self) -> &BTreeSet<EmailAddress> {
        &self.emails
    }

    /// True when any of this identity's emails appears in `allow_list`.
    pub fn shares_email_with(&self, allow_list: &BTreeSet<EmailAddress>) -> bool {
        self.emails.iter().any(|email| allow_list.contains(email))
    }
}
