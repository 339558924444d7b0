//! Directory configuration schema.
//!
//! A `DirectoryConfig` is deserialized from TOML and lists every consortium
//! organization with its pre-shared secret.
//!
//! Example:
//! ```toml
//! shared_secret = "SharedHealthcareKey2025!"
//!
//! [[orgs]]
//! id = "Hospital"
//! secret = "HospitalKey2025!"
//!
//! [[orgs]]
//! id = "Auditor"
//! secret = "AuditorKey2025!"
//! validator = false
//! ```

use serde::{Deserialize, Serialize};

use medledger_contracts::org::KeyMaterial;

fn default_validator() -> bool {
    true
}

/// One organization entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrgConfig {
    /// Case-sensitive organization identifier.
    pub id: String,

    /// Pre-shared secret the organization's key is derived from.
    pub secret: KeyMaterial,

    /// Whether the organization may append blocks. Defaults to `true`;
    /// non-validators can still read messages addressed to them.
    #[serde(default = "default_validator")]
    pub validator: bool,
}

/// The top-level structure deserialized from a directory TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DirectoryConfig {
    /// Consortium-wide secret returned for the `shared` key id.
    #[serde(default)]
    pub shared_secret: Option<KeyMaterial>,

    /// Member organizations, in display order.
    #[serde(default)]
    pub orgs: Vec<OrgConfig>,
}
