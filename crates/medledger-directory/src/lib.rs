//! # medledger-directory
//!
//! A TOML-configured organization directory for the MedLedger ledger.
//!
//! ## Overview
//!
//! This crate provides [`StaticDirectory`], which implements the
//! [`Directory`](medledger_core::traits::Directory) trait. Organizations,
//! their pre-shared secrets, and their validator flag are declared in a TOML
//! file; an optional `shared_secret` answers lookups for the `shared` key id.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use std::{path::Path, sync::Arc};
//! use medledger_core::Ledger;
//! use medledger_directory::StaticDirectory;
//!
//! let directory = StaticDirectory::from_file(Path::new("consortium.toml"))?;
//! let ledger = Ledger::new(Arc::new(directory))?;
//! ```

pub mod config;
pub mod directory;

pub use config::{DirectoryConfig, OrgConfig};
pub use directory::StaticDirectory;

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use medledger_contracts::error::LedgerError;
    use medledger_core::traits::Directory;

    use crate::StaticDirectory;

    const CONSORTIUM: &str = r#"
        shared_secret = "SharedHealthcareKey2025!"

        [[orgs]]
        id = "Hospital"
        secret = "HospitalKey2025!"

        [[orgs]]
        id = "Lab"
        secret = "LabSecretKey2025!"

        [[orgs]]
        id = "Auditor"
        secret = "AuditorKey2025!"
        validator = false
    "#;

    fn expect_config_error(result: Result<StaticDirectory, LedgerError>, needle: &str) {
        match result {
            Err(LedgerError::ConfigError { reason }) => {
                assert!(reason.contains(needle), "expected '{needle}' in reason, got: {reason}");
            }
            other => panic!("expected ConfigError, got {:?}", other),
        }
    }

    // ── 1. loading ────────────────────────────────────────────────────────────

    #[test]
    fn test_load_consortium() {
        let dir = StaticDirectory::from_toml_str(CONSORTIUM).unwrap();

        assert!(dir.is_validator("Hospital"));
        assert!(dir.is_validator("Lab"));
        assert!(!dir.is_validator("Auditor"), "validator = false must be honoured");
        assert_eq!(dir.all_org_ids(), vec!["Hospital", "Lab", "Auditor"]);
    }

    #[test]
    fn test_validator_defaults_to_true() {
        let dir = StaticDirectory::from_toml_str(
            r#"
            [[orgs]]
            id = "Insurance"
            secret = "InsureKey2025!"
        "#,
        )
        .unwrap();
        assert!(dir.is_validator("Insurance"));
    }

    // ── 2. key lookups ────────────────────────────────────────────────────────

    #[test]
    fn test_shared_key_lookup() {
        let dir = StaticDirectory::from_toml_str(CONSORTIUM).unwrap();
        let shared = dir.get_key("shared").unwrap();
        assert_eq!(shared.expose_secret(), "SharedHealthcareKey2025!");
    }

    #[test]
    fn test_org_key_lookup() {
        let dir = StaticDirectory::from_toml_str(CONSORTIUM).unwrap();
        assert_eq!(dir.get_key("Lab").unwrap().expose_secret(), "LabSecretKey2025!");
    }

    #[test]
    fn test_unknown_ids_resolve_nothing() {
        let dir = StaticDirectory::from_toml_str(CONSORTIUM).unwrap();
        assert!(dir.get_key("Hacker").is_none());
        assert!(dir.get_key("hospital").is_none(), "lookups are case-sensitive");
        assert!(!dir.is_validator("Hacker"));
        assert!(!dir.is_member("Hacker"));
    }

    #[test]
    fn test_no_shared_secret() {
        let dir = StaticDirectory::new()
            .with_validator("Hospital", "HospitalKey2025!")
            .unwrap();
        assert!(dir.get_key("shared").is_none());
        assert!(dir.get_key("Hospital").is_some());
    }

    // ── 3. builder ────────────────────────────────────────────────────────────

    #[test]
    fn test_builder_member_is_not_validator() {
        let dir = StaticDirectory::new()
            .with_shared_secret("s")
            .unwrap()
            .with_member("Auditor", "a")
            .unwrap();
        assert!(dir.is_member("Auditor"));
        assert!(!dir.is_validator("Auditor"));
    }

    // ── 4. invalid configuration ──────────────────────────────────────────────

    #[test]
    fn test_malformed_toml() {
        expect_config_error(
            StaticDirectory::from_toml_str("orgs = [ not toml"),
            "failed to parse directory TOML",
        );
    }

    #[test]
    fn test_duplicate_org() {
        let toml = r#"
            [[orgs]]
            id = "Lab"
            secret = "a"

            [[orgs]]
            id = "Lab"
            secret = "b"
        "#;
        expect_config_error(StaticDirectory::from_toml_str(toml), "listed twice");
    }

    #[test]
    fn test_reserved_shared_id() {
        let toml = r#"
            [[orgs]]
            id = "shared"
            secret = "x"
        "#;
        expect_config_error(StaticDirectory::from_toml_str(toml), "reserved");
    }

    #[test]
    fn test_empty_secret() {
        let toml = r#"
            [[orgs]]
            id = "Lab"
            secret = ""
        "#;
        expect_config_error(StaticDirectory::from_toml_str(toml), "empty secret");
    }

    #[test]
    fn test_empty_shared_secret() {
        expect_config_error(
            StaticDirectory::from_toml_str(r#"shared_secret = """#),
            "shared_secret",
        );
    }

    #[test]
    fn test_builder_rejects_empty_shared_secret() {
        expect_config_error(StaticDirectory::new().with_shared_secret(""), "shared_secret");
    }

    #[test]
    fn test_missing_file() {
        expect_config_error(
            StaticDirectory::from_file(std::path::Path::new("/nonexistent/consortium.toml")),
            "failed to read directory file",
        );
    }

    #[test]
    fn test_debug_output_hides_secrets() {
        let dir = StaticDirectory::from_toml_str(CONSORTIUM).unwrap();
        let rendered = format!("{:?}", dir);
        assert!(!rendered.contains("HospitalKey2025!"));
        assert!(!rendered.contains("SharedHealthcareKey2025!"));
    }
}
