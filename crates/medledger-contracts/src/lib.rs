//! # medledger-contracts
//!
//! Shared types and error contracts for the MedLedger proof-of-authority
//! ledger.
//!
//! Every crate in the workspace imports from here. No ledger logic lives in
//! this crate, only message payloads, read models, and the error taxonomy.

pub mod error;
pub mod message;
pub mod org;
pub mod view;

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use error::LedgerError;
    use message::{HealthMessage, MessageRequest};
    use org::{KeyMaterial, LedgerId};
    use view::{Disclosure, Redaction, REDACTION_MARKER, UNDECRYPTABLE_MARKER};

    fn lab_request() -> HealthMessage {
        HealthMessage::new("LAB_REQUEST", "Hospital", "Lab", "Run CBC").with_patient("P101")
    }

    // ── HealthMessage ────────────────────────────────────────────────────────

    #[test]
    fn message_wire_form_uses_camel_case_and_type_key() {
        let json = lab_request().to_canonical_json().unwrap();
        assert!(json.contains(r#""type":"LAB_REQUEST""#), "got {json}");
        assert!(json.contains(r#""patientId":"P101""#), "got {json}");
        assert!(!json.contains("kind"));
    }

    #[test]
    fn message_without_patient_omits_the_field() {
        let json = HealthMessage::new("NOTE", "Lab", "Hospital", "ok")
            .to_canonical_json()
            .unwrap();
        assert!(!json.contains("patientId"));
    }

    #[test]
    fn message_parses_back_from_canonical_json() {
        let original = lab_request();
        let json = original.to_canonical_json().unwrap();
        let parsed: HealthMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, original);
    }

    #[test]
    fn involves_is_case_sensitive() {
        let msg = lab_request();
        assert!(msg.involves("Hospital"));
        assert!(msg.involves("Lab"));
        assert!(!msg.involves("hospital"));
        assert!(!msg.involves("Insurance"));
    }

    // ── MessageRequest ───────────────────────────────────────────────────────

    #[test]
    fn request_reports_first_blank_field() {
        let req = MessageRequest {
            kind: "LAB_REQUEST".to_string(),
            from: "Hospital".to_string(),
            to: "   ".to_string(),
            patient_id: None,
            content: String::new(),
        };
        match req.require_fields() {
            Err(LedgerError::MissingField { field }) => assert_eq!(field, "to"),
            other => panic!("expected MissingField, got {:?}", other),
        }
    }

    #[test]
    fn request_blank_patient_becomes_absent() {
        let req = MessageRequest {
            kind: "NOTE".to_string(),
            from: "Hospital".to_string(),
            to: "Lab".to_string(),
            patient_id: Some("  ".to_string()),
            content: "hello".to_string(),
        };
        req.require_fields().unwrap();
        let msg = req.into_message(Utc::now());
        assert_eq!(msg.patient_id, None);
    }

    // ── KeyMaterial ──────────────────────────────────────────────────────────

    #[test]
    fn key_material_debug_never_prints_secret() {
        let key = KeyMaterial::new("HospitalKey2025!");
        let rendered = format!("{:?}", key);
        assert!(!rendered.contains("HospitalKey2025!"));
        assert_eq!(key.expose_secret(), "HospitalKey2025!");
    }

    #[test]
    fn ledger_ids_are_unique() {
        let ids: std::collections::HashSet<String> =
            (0..50).map(|_| LedgerId::new().to_string()).collect();
        assert_eq!(ids.len(), 50);
    }

    // ── Disclosure ───────────────────────────────────────────────────────────

    #[test]
    fn hidden_disclosure_exposes_type_only() {
        let d = Disclosure::Withheld(Redaction::Hidden {
            message_type: "LAB_RESULT".to_string(),
        });
        assert_eq!(d.message_type(), Some("LAB_RESULT"));
        assert_eq!(d.display_content(), REDACTION_MARKER);
        assert!(!d.is_visible());
    }

    #[test]
    fn corrupted_disclosure_has_no_type() {
        let d = Disclosure::Withheld(Redaction::Corrupted {
            detail: "malformed envelope".to_string(),
        });
        assert_eq!(d.message_type(), None);
        assert_eq!(d.display_content(), UNDECRYPTABLE_MARKER);
        assert!(d.is_corrupted());
    }

    #[test]
    fn disclosure_serializes_with_status_tag() {
        let d = Disclosure::Withheld(Redaction::KeyUnavailable);
        let json = serde_json::to_value(&d).unwrap();
        assert_eq!(json["status"], "withheld");
        assert_eq!(json["payload"]["reason"], "key_unavailable");
    }

    // ── LedgerError display messages ─────────────────────────────────────────

    #[test]
    fn error_unauthorized_names_org() {
        let err = LedgerError::Unauthorized {
            org_id: "Hacker".to_string(),
        };
        assert!(err.to_string().contains("Hacker"));
    }

    #[test]
    fn error_no_key_lists_candidates() {
        let err = LedgerError::NoKeyAvailable {
            key_ids: vec!["shared".to_string(), "Lab".to_string()],
        };
        let msg = err.to_string();
        assert!(msg.contains("shared, Lab"), "got {msg}");
    }

    #[test]
    fn error_index_out_of_range_display() {
        let err = LedgerError::IndexOutOfRange { index: 9, len: 3 };
        let msg = err.to_string();
        assert!(msg.contains('9'));
        assert!(msg.contains("length 3"));
    }
}
