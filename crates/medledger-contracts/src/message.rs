//! Structured healthcare message payloads.
//!
//! A `HealthMessage` is the plaintext committed (encrypted) to a block. Its
//! JSON form is the canonical encoding fed to the codec, so field names and
//! order are part of the on-chain format.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, LedgerResult};

/// One message exchanged between consortium members.
///
/// The ledger treats the payload as opaque except for `from` and `to`, which
/// drive viewer-scoped redaction after decryption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthMessage {
    /// Message discriminant, e.g. "LAB_REQUEST" or "CLAIM_APPROVAL".
    #[serde(rename = "type")]
    pub kind: String,
    /// Sending organization id.
    pub from: String,
    /// Receiving organization id.
    pub to: String,
    /// Patient the message concerns, when there is one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_id: Option<String>,
    /// Free-text clinical or administrative content.
    pub content: String,
    /// When the sender composed the message (UTC).
    pub timestamp: DateTime<Utc>,
}

impl HealthMessage {
    pub fn new(
        kind: impl Into<String>,
        from: impl Into<String>,
        to: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            kind: kind.into(),
            from: from.into(),
            to: to.into(),
            patient_id: None,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn with_patient(mut self, patient_id: impl Into<String>) -> Self {
        self.patient_id = Some(patient_id.into());
        self
    }

    /// True if `org_id` is the sender or the recipient (exact match).
    pub fn involves(&self, org_id: &str) -> bool {
        self.from == org_id || self.to == org_id
    }

    /// Encode to the canonical JSON text that gets encrypted.
    pub fn to_canonical_json(&self) -> LedgerResult<String> {
        serde_json::to_string(self).map_err(|e| LedgerError::Serialization {
            reason: e.to_string(),
        })
    }
}

/// An unvalidated submission, as an outer layer (HTTP form, CLI) receives it.
///
/// `Ledger::submit` validates it, stamps the timestamp, and appends the
/// resulting `HealthMessage` on behalf of `from`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageRequest {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub to: String,
    #[serde(default)]
    pub patient_id: Option<String>,
    #[serde(default)]
    pub content: String,
}

impl MessageRequest {
    /// Check that every required field is present and non-blank.
    ///
    /// Fields are checked in wire order so the first missing one is reported.
    pub fn require_fields(&self) -> LedgerResult<()> {
        let required = [
            ("type", &self.kind),
            ("from", &self.from),
            ("to", &self.to),
            ("content", &self.content),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(LedgerError::MissingField {
                    field: field.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Convert into a timestamped message. Blank patient ids become absent.
    pub fn into_message(self, timestamp: DateTime<Utc>) -> HealthMessage {
        HealthMessage {
            kind: self.kind,
            from: self.from,
            to: self.to,
            patient_id: self.patient_id.filter(|p| !p.trim().is_empty()),
            content: self.content,
            timestamp,
        }
    }
}
