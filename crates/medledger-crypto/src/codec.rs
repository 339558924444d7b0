//! Key derivation and AES-256-GCM encryption of block payloads.
//!
//! Key derivation: SHA-256(secret) -> 256-bit AES key
//! Encryption: AES-256-GCM, fresh random 12-byte nonce per call
//! Associated data: a fixed format label, so envelopes from other systems
//! sharing a secret do not open here.

use std::fmt;

use aes_gcm::aead::{Aead, Payload};
use aes_gcm::{Aes256Gcm, Key, KeyInit, Nonce};
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};

use medledger_contracts::{
    error::{LedgerError, LedgerResult},
    org::KeyMaterial,
};

use crate::envelope::{Envelope, NONCE_LEN};

/// Associated data bound into every envelope.
const ENVELOPE_AAD: &[u8] = b"medledger-envelope-v1";

/// A derived 256-bit symmetric key. `Debug` is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct SymmetricKey([u8; 32]);

impl SymmetricKey {
    fn cipher(&self) -> Aes256Gcm {
        Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&self.0))
    }
}

impl fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SymmetricKey(<redacted>)")
    }
}

/// Derive a fixed-length key from an arbitrary-length secret.
///
/// Deterministic: the same secret always yields the same key.
pub fn derive_key(secret: &KeyMaterial) -> LedgerResult<SymmetricKey> {
    if secret.is_empty() {
        return Err(LedgerError::MissingKey);
    }
    let digest: [u8; 32] = Sha256::digest(secret.expose_secret().as_bytes()).into();
    Ok(SymmetricKey(digest))
}

/// Encrypt `plaintext` under a key derived from `secret`.
pub fn encrypt(plaintext: &str, secret: &KeyMaterial) -> LedgerResult<Envelope> {
    let key = derive_key(secret)?;
    encrypt_with_key(plaintext, &key)
}

/// Encrypt `plaintext` under an already-derived key.
pub fn encrypt_with_key(plaintext: &str, key: &SymmetricKey) -> LedgerResult<Envelope> {
    if plaintext.is_empty() {
        return Err(LedgerError::MissingPlaintext);
    }

    let mut nonce = [0u8; NONCE_LEN];
    OsRng.fill_bytes(&mut nonce);

    let sealed = key
        .cipher()
        .encrypt(
            Nonce::from_slice(&nonce),
            Payload {
                msg: plaintext.as_bytes(),
                aad: ENVELOPE_AAD,
            },
        )
        .map_err(|e| LedgerError::EncryptionFailed {
            reason: e.to_string(),
        })?;

    Ok(Envelope { nonce, sealed })
}

/// Parse `envelope` and decrypt it under a key derived from `secret`.
///
/// A wrong key, a flipped bit, or a truncated body all fail the GCM tag
/// check and surface as `Decryption`.
pub fn decrypt(envelope: &str, secret: &KeyMaterial) -> LedgerResult<String> {
    let key = derive_key(secret)?;
    decrypt_with_key(envelope, &key)
}

/// Parse `envelope` and decrypt it under an already-derived key.
pub fn decrypt_with_key(envelope: &str, key: &SymmetricKey) -> LedgerResult<String> {
    let envelope = Envelope::parse(envelope)?;

    let plaintext = key
        .cipher()
        .decrypt(
            Nonce::from_slice(&envelope.nonce),
            Payload {
                msg: &envelope.sealed,
                aad: ENVELOPE_AAD,
            },
        )
        .map_err(|_| LedgerError::Decryption {
            reason: "authentication tag mismatch (wrong key or corrupted ciphertext)".to_string(),
        })?;

    String::from_utf8(plaintext).map_err(|e| LedgerError::Decryption {
        reason: format!("plaintext is not UTF-8: {}", e),
    })
}
