//! The organization directory capability.
//!
//! The ledger never owns authorization or key state. It asks a `Directory`
//! two questions, "may this organization append?" and "what secret does
//! this identifier use?", and a third one for read-side redaction, "is this
//! viewer a consortium member at all?".
//!
//! Identifiers are case-sensitive exact matches. Implementations must never
//! map an unknown identifier onto a default organization.

use medledger_contracts::org::KeyMaterial;

/// A read-mostly registry of consortium organizations and their secrets.
///
/// Implementations are shared across threads by the ledger and must be
/// cheap to query; the ledger calls them on every append and every read.
pub trait Directory: Send + Sync {
    /// Return true if `org_id` is an authorized validator.
    ///
    /// Membership in the validator set is the only admission gate for
    /// appends. No signature or proof-of-work is involved.
    fn is_validator(&self, org_id: &str) -> bool;

    /// Return the pre-shared secret for `key_id`, if one is configured.
    ///
    /// `key_id` is an organization id or the reserved `SHARED_KEY_ID`.
    fn get_key(&self, key_id: &str) -> Option<KeyMaterial>;

    /// Every organization id the directory knows, in a stable order.
    fn all_org_ids(&self) -> Vec<String>;

    /// Return true if `org_id` is any known organization.
    fn is_member(&self, org_id: &str) -> bool {
        self.all_org_ids().iter().any(|id| id == org_id)
    }
}
