//! Access-control predicates for inventory sharing.
//!
//! Two tiers: *use* (read/write products, read inventory settings, view
//! dashboards) is granted to the owner and to anyone whose verified email is
//! on the inventory's allow-list; *manage* (metadata mutation and deletion)
//! is owner-only.
//!
//! Policy: an id that does not resolve is `NotFound`; one that resolves but
//! is not accessible is `Forbidden`. Applied uniformly by every caller.

use super::identity::Identity;
use super::inventory::Inventory;
use super::{Error, Result};

/// True when `identity` may read and write the inventory's products.
pub fn can_use(identity: &Identity, inventory: &Inventory) -> bool {
    identity.owner_id() == &inventory.owner_id
        || identity.shares_email_with(&inventory.allowed_emails)
}

/// True when `identity` may mutate the inventory's metadata or delete it.
pub fn can_manage(identity: &Identity, inventory: &Inventory) -> bool {
    identity.owner_id() == &inventory.owner_id
}

/// Gate product-level operations, rejecting with `Forbidden`.
pub fn ensure_can_use(identity: &Identity, inventory: &Inventory) -> Result<()> {
    if can_use(identity, inventory) {
        Ok(())
    } else {
        Err(Error::forbidden("access to this inventory is denied"))
    }
}

/// Gate metadata mutation and deletion, rejecting with `Forbidden`.
///
/// The message distinguishes a sharing identity overreaching from a stranger
/// only in logs, not in the response, to keep the policy uniform.
pub fn ensure_can_manage(identity: &Identity, inventory: &Inventory) -> Result<()> {
    if can_manage(identity, inventory) {
        Ok(())
    } else {
        Err(Error::forbidden(
            "only the owner can modify inventory settings",
        ))
    }
}
