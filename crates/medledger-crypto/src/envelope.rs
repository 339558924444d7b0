//! The serialized ciphertext envelope stored in a block.
//!
//! Text layout: `hex(nonce) ":" hex(ciphertext || tag)`, lowercase hex.
//! The nonce is 12 bytes; the GCM tag is the trailing 16 bytes of the body.

use std::fmt;

use medledger_contracts::error::{LedgerError, LedgerResult};

/// Nonce length for AES-256-GCM.
pub const NONCE_LEN: usize = 12;

/// Authentication tag length appended by AES-256-GCM.
pub const TAG_LEN: usize = 16;

const DELIMITER: char = ':';

/// A nonce plus the sealed bytes it was used for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub nonce: [u8; NONCE_LEN],
    /// Ciphertext with the authentication tag appended.
    pub sealed: Vec<u8>,
}

impl Envelope {
    /// Parse the textual form produced by `Display`.
    pub fn parse(text: &str) -> LedgerResult<Self> {
        if text.is_empty() {
            return Err(LedgerError::MissingCiphertext);
        }

        let parts: Vec<&str> = text.split(DELIMITER).collect();
        let [nonce_hex, sealed_hex] = parts.as_slice() else {
            return Err(LedgerError::MalformedEnvelope {
                reason: format!("expected 2 ':'-separated fields, found {}", parts.len()),
            });
        };

        let nonce_bytes = hex::decode(nonce_hex).map_err(|e| LedgerError::MalformedEnvelope {
            reason: format!("nonce is not hex: {}", e),
        })?;
        let nonce: [u8; NONCE_LEN] =
            nonce_bytes
                .try_into()
                .map_err(|bytes: Vec<u8>| LedgerError::MalformedEnvelope {
                    reason: format!("nonce must be {} bytes, got {}", NONCE_LEN, bytes.len()),
                })?;

        let sealed = hex::decode(sealed_hex).map_err(|e| LedgerError::MalformedEnvelope {
            reason: format!("ciphertext is not hex: {}", e),
        })?;
        if sealed.len() < TAG_LEN {
            return Err(LedgerError::MalformedEnvelope {
                reason: format!(
                    "ciphertext shorter than the {}-byte authentication tag",
                    TAG_LEN
                ),
            });
        }

        Ok(Self { nonce, sealed })
    }
}

impl fmt::Display for Envelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            hex::encode(self.nonce),
            DELIMITER,
            hex::encode(&self.sealed)
        )
    }
}
