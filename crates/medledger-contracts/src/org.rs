//! Organization identifiers and key material.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Key identifier that resolves the consortium-wide shared secret.
pub const SHARED_KEY_ID: &str = "shared";

/// Author recorded on the genesis block, and the second key id tried for it.
pub const SYSTEM_ORG_ID: &str = "System";

/// A pre-shared secret as stored in the organization directory.
///
/// The secret is only readable through [`KeyMaterial::expose_secret`], and
/// `Debug` never prints it, so a `KeyMaterial` can sit inside structs that
/// are logged.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyMaterial(String);

impl KeyMaterial {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// Borrow the raw secret. Only the codec should call this.
    pub fn expose_secret(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("KeyMaterial(<redacted>)")
    }
}

/// Unique identifier for one in-process ledger instance.
///
/// Appears in every tracing event the ledger emits and in exported views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LedgerId(pub uuid::Uuid);

impl LedgerId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for LedgerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for LedgerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
