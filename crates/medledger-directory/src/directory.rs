//! In-memory `Directory` implementation.
//!
//! `StaticDirectory` is built once, from TOML or with the builder methods,
//! and is read-only afterwards, so it can be shared across threads behind an
//! `Arc` without locking.

use std::collections::BTreeMap;
use std::path::Path;

use tracing::{debug, info};

use medledger_contracts::{
    error::{LedgerError, LedgerResult},
    org::{KeyMaterial, SHARED_KEY_ID},
};
use medledger_core::traits::Directory;

use crate::config::DirectoryConfig;

#[derive(Debug, Clone)]
struct OrgEntry {
    secret: KeyMaterial,
    validator: bool,
}

/// A fixed consortium of organizations and their secrets.
///
/// ```rust,ignore
/// use medledger_directory::StaticDirectory;
///
/// let directory = StaticDirectory::from_file(Path::new("consortium.toml"))?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticDirectory {
    shared: Option<KeyMaterial>,
    /// Insertion order of `orgs`, reported by `all_org_ids`.
    order: Vec<String>,
    orgs: BTreeMap<String, OrgEntry>,
}

impl StaticDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `s` as TOML and build a directory.
    ///
    /// Returns `LedgerError::ConfigError` if the TOML is malformed or an
    /// entry is invalid (see [`StaticDirectory::from_config`]).
    pub fn from_toml_str(s: &str) -> LedgerResult<Self> {
        let config: DirectoryConfig = toml::from_str(s).map_err(|e| LedgerError::ConfigError {
            reason: format!("failed to parse directory TOML: {}", e),
        })?;
        Self::from_config(config)
    }

    /// Read the file at `path` and parse it as directory configuration.
    pub fn from_file(path: &Path) -> LedgerResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| LedgerError::ConfigError {
            reason: format!("failed to read directory file '{}': {}", path.display(), e),
        })?;
        let directory = Self::from_toml_str(&contents)?;
        info!(
            path = %path.display(),
            orgs = directory.order.len(),
            "organization directory loaded"
        );
        Ok(directory)
    }

    /// Build a directory from an already-parsed configuration.
    ///
    /// Rejects empty ids, empty secrets, duplicate ids, and the reserved
    /// `shared` id.
    pub fn from_config(config: DirectoryConfig) -> LedgerResult<Self> {
        let mut directory = Self::new();
        if let Some(shared) = config.shared_secret {
            directory.set_shared(shared)?;
        }
        for org in config.orgs {
            directory.insert(org.id, org.secret, org.validator)?;
        }
        debug!(
            orgs = directory.order.len(),
            shared_key = directory.shared.is_some(),
            "directory built from config"
        );
        Ok(directory)
    }

    /// Builder: add a validator organization.
    pub fn with_validator(
        mut self,
        id: impl Into<String>,
        secret: impl Into<String>,
    ) -> LedgerResult<Self> {
        self.insert(id.into(), KeyMaterial::new(secret), true)?;
        Ok(self)
    }

    /// Builder: add an organization that may read but not append.
    pub fn with_member(
        mut self,
        id: impl Into<String>,
        secret: impl Into<String>,
    ) -> LedgerResult<Self> {
        self.insert(id.into(), KeyMaterial::new(secret), false)?;
        Ok(self)
    }

    /// Builder: set the consortium-wide shared secret.
    pub fn with_shared_secret(mut self, secret: impl Into<String>) -> LedgerResult<Self> {
        self.set_shared(KeyMaterial::new(secret))?;
        Ok(self)
    }

    fn set_shared(&mut self, secret: KeyMaterial) -> LedgerResult<()> {
        if secret.is_empty() {
            return Err(LedgerError::ConfigError {
                reason: "shared_secret must not be empty".to_string(),
            });
        }
        self.shared = Some(secret);
        Ok(())
    }

    fn insert(&mut self, id: String, secret: KeyMaterial, validator: bool) -> LedgerResult<()> {
        if id.trim().is_empty() {
            return Err(LedgerError::ConfigError {
                reason: "organization id must not be empty".to_string(),
            });
        }
        if id == SHARED_KEY_ID {
            return Err(LedgerError::ConfigError {
                reason: format!("'{}' is a reserved key id, not an organization", SHARED_KEY_ID),
            });
        }
        if secret.is_empty() {
            return Err(LedgerError::ConfigError {
                reason: format!("organization '{}' has an empty secret", id),
            });
        }
        if self.orgs.contains_key(&id) {
            return Err(LedgerError::ConfigError {
                reason: format!("organization '{}' is listed twice", id),
            });
        }
        self.order.push(id.clone());
        self.orgs.insert(id, OrgEntry { secret, validator });
        Ok(())
    }
}

impl Directory for StaticDirectory {
    fn is_validator(&self, org_id: &str) -> bool {
        self.orgs.get(org_id).is_some_and(|org| org.validator)
    }

    /// `shared` resolves the consortium secret; anything else is an exact
    /// organization lookup.
    fn get_key(&self, key_id: &str) -> Option<KeyMaterial> {
        if key_id == SHARED_KEY_ID {
            return self.shared.clone();
        }
        self.orgs.get(key_id).map(|org| org.secret.clone())
    }

    fn all_org_ids(&self) -> Vec<String> {
        self.order.clone()
    }

    fn is_member(&self, org_id: &str) -> bool {
        self.orgs.contains_key(org_id)
    }
}
