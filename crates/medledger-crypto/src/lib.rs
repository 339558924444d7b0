//! # medledger-crypto
//!
//! Symmetric payload codec for the MedLedger ledger.
//!
//! Every message is sealed with AES-256-GCM under a key derived from a
//! pre-shared secret, and stored as a self-describing text envelope
//! (`hex(nonce):hex(ciphertext||tag)`). The authenticated mode means a wrong
//! key or a corrupted envelope is always reported, never silently decoded
//! into garbage.
//!
//! ```rust,ignore
//! use medledger_contracts::org::KeyMaterial;
//! use medledger_crypto::{decrypt, encrypt};
//!
//! let secret = KeyMaterial::new("SharedHealthcareKey2025!");
//! let envelope = encrypt("Run CBC", &secret)?.to_string();
//! assert_eq!(decrypt(&envelope, &secret)?, "Run CBC");
//! ```

pub mod codec;
pub mod envelope;

pub use codec::{decrypt, decrypt_with_key, derive_key, encrypt, encrypt_with_key, SymmetricKey};
pub use envelope::{Envelope, NONCE_LEN, TAG_LEN};

#[cfg(test)]
mod tests {
    use medledger_contracts::{error::LedgerError, org::KeyMaterial};

    use super::*;

    fn secret(s: &str) -> KeyMaterial {
        KeyMaterial::new(s)
    }

    // ── Key derivation ────────────────────────────────────────────────────────

    #[test]
    fn derive_key_is_deterministic() {
        let a = derive_key(&secret("HospitalKey2025!")).unwrap();
        let b = derive_key(&secret("HospitalKey2025!")).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn different_secrets_derive_different_keys() {
        let a = derive_key(&secret("HospitalKey2025!")).unwrap();
        let b = derive_key(&secret("LabSecretKey2025!")).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn empty_secret_is_missing_key() {
        assert!(matches!(derive_key(&secret("")), Err(LedgerError::MissingKey)));
        assert!(matches!(encrypt("x", &secret("")), Err(LedgerError::MissingKey)));
        assert!(matches!(decrypt("aa:bb", &secret("")), Err(LedgerError::MissingKey)));
    }

    #[test]
    fn symmetric_key_debug_is_redacted() {
        let key = derive_key(&secret("HospitalKey2025!")).unwrap();
        assert_eq!(format!("{:?}", key), "SymmetricKey(<redacted>)");
    }

    // ── Encrypt / decrypt ─────────────────────────────────────────────────────

    #[test]
    fn decrypt_recovers_plaintext() {
        let s = secret("SharedHealthcareKey2025!");
        let plaintext = r#"{"type":"LAB_REQUEST","content":"Run CBC, CRP"}"#;
        let envelope = encrypt(plaintext, &s).unwrap().to_string();
        assert_eq!(decrypt(&envelope, &s).unwrap(), plaintext);
    }

    #[test]
    fn same_plaintext_twice_gives_distinct_envelopes() {
        let s = secret("SharedHealthcareKey2025!");
        let first = encrypt("Admitted for pneumonia", &s).unwrap().to_string();
        let second = encrypt("Admitted for pneumonia", &s).unwrap().to_string();

        assert_ne!(first, second, "fresh nonce must change the envelope");
        assert_eq!(decrypt(&first, &s).unwrap(), "Admitted for pneumonia");
        assert_eq!(decrypt(&second, &s).unwrap(), "Admitted for pneumonia");
    }

    #[test]
    fn envelope_text_layout() {
        let envelope = encrypt("abc", &secret("k")).unwrap();
        let text = envelope.to_string();
        let (nonce_hex, body_hex) = text.split_once(':').unwrap();
        assert_eq!(nonce_hex.len(), NONCE_LEN * 2);
        // 3 plaintext bytes + 16-byte tag, hex encoded.
        assert_eq!(body_hex.len(), (3 + TAG_LEN) * 2);
        assert_eq!(Envelope::parse(&text).unwrap(), envelope);
    }

    #[test]
    fn empty_plaintext_is_rejected() {
        assert!(matches!(
            encrypt("", &secret("k")),
            Err(LedgerError::MissingPlaintext)
        ));
    }

    // ── Failure paths ─────────────────────────────────────────────────────────

    #[test]
    fn wrong_key_fails_authentication() {
        let envelope = encrypt("Approved up to $5,000", &secret("InsureKey2025!"))
            .unwrap()
            .to_string();
        let result = decrypt(&envelope, &secret("LabSecretKey2025!"));
        assert!(matches!(result, Err(LedgerError::Decryption { .. })), "got {:?}", result);
    }

    #[test]
    fn flipped_ciphertext_byte_fails_authentication() {
        let s = secret("k");
        let mut envelope = encrypt("WBC=15k", &s).unwrap();
        envelope.sealed[0] ^= 0x01;
        let result = decrypt(&envelope.to_string(), &s);
        assert!(matches!(result, Err(LedgerError::Decryption { .. })));
    }

    #[test]
    fn empty_envelope_is_missing_ciphertext() {
        assert!(matches!(
            decrypt("", &secret("k")),
            Err(LedgerError::MissingCiphertext)
        ));
    }

    #[test]
    fn envelope_without_delimiter_is_malformed() {
        let result = decrypt("tampered-data", &secret("k"));
        match result {
            Err(LedgerError::MalformedEnvelope { reason }) => {
                assert!(reason.contains("found 1"), "got {reason}");
            }
            other => panic!("expected MalformedEnvelope, got {:?}", other),
        }
    }

    #[test]
    fn envelope_with_extra_fields_is_malformed() {
        let result = Envelope::parse("00:11:22");
        assert!(matches!(result, Err(LedgerError::MalformedEnvelope { .. })));
    }

    #[test]
    fn envelope_with_short_nonce_is_malformed() {
        let body = "00".repeat(TAG_LEN + 1);
        let result = Envelope::parse(&format!("abcd:{}", body));
        match result {
            Err(LedgerError::MalformedEnvelope { reason }) => {
                assert!(reason.contains("12 bytes"), "got {reason}");
            }
            other => panic!("expected MalformedEnvelope, got {:?}", other),
        }
    }

    #[test]
    fn envelope_with_non_hex_body_is_malformed() {
        let nonce = "00".repeat(NONCE_LEN);
        let result = Envelope::parse(&format!("{}:not-hex", nonce));
        assert!(matches!(result, Err(LedgerError::MalformedEnvelope { .. })));
    }

    #[test]
    fn envelope_shorter_than_tag_is_malformed() {
        let nonce = "00".repeat(NONCE_LEN);
        let result = Envelope::parse(&format!("{}:{}", nonce, "ab".repeat(TAG_LEN - 1)));
        assert!(matches!(result, Err(LedgerError::MalformedEnvelope { .. })));
    }
}
