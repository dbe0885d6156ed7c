//! Drag transfer channel and the versioned column payload it carries.
//!
//! A column-move gesture writes a [`ColumnTransferPayload`] as JSON under the
//! [`TEXT_FORMAT`] entry of a [`TransferChannel`] at drag-start; the drop
//! target reads it back. Anything that does not decode into a supported
//! payload is treated as a foreign drop and ignored.

use std::collections::BTreeMap;

use gridhead_core::ColumnKey;
use serde::{Deserialize, Serialize};

/// Format name the column payload is stored under.
pub const TEXT_FORMAT: &str = "Text";

/// Current column transfer payload schema version.
///
/// Versioning policy:
/// - Payloads without `schema_version` are read as the current version.
/// - Breaking field/semantic changes must bump this version.
pub const COLUMN_TRANSFER_SCHEMA_VERSION: u16 = 1;

/// Key/value string store shared by drag-start and drop for one gesture.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransferChannel {
    entries: BTreeMap<String, String>,
}

impl TransferChannel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_data(&mut self, format: impl Into<String>, data: impl Into<String>) {
        self.entries.insert(format.into(), data.into());
    }

    #[must_use]
    pub fn get_data(&self, format: &str) -> Option<&str> {
        self.entries.get(format).map(String::as_str)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Store `payload` under [`TEXT_FORMAT`].
    pub fn write_column_payload(
        &mut self,
        payload: &ColumnTransferPayload,
    ) -> Result<(), TransferPayloadError> {
        let encoded = payload.encode()?;
        self.set_data(TEXT_FORMAT, encoded);
        Ok(())
    }

    /// Read and validate the payload under [`TEXT_FORMAT`].
    pub fn read_column_payload(&self) -> Result<ColumnTransferPayload, TransferPayloadError> {
        let raw = self
            .get_data(TEXT_FORMAT)
            .ok_or(TransferPayloadError::Missing)?;
        ColumnTransferPayload::decode(raw)
    }
}

/// Identity and position of the column being moved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnTransferPayload {
    #[serde(default = "default_schema_version")]
    pub schema_version: u16,
    pub key: ColumnKey,
    pub index: usize,
}

fn default_schema_version() -> u16 {
    COLUMN_TRANSFER_SCHEMA_VERSION
}

impl ColumnTransferPayload {
    #[must_use]
    pub fn new(key: ColumnKey, index: usize) -> Self {
        Self {
            schema_version: COLUMN_TRANSFER_SCHEMA_VERSION,
            key,
            index,
        }
    }

    pub fn encode(&self) -> Result<String, TransferPayloadError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse and validate a payload string.
    pub fn decode(raw: &str) -> Result<Self, TransferPayloadError> {
        let payload: Self = serde_json::from_str(raw)?;
        payload.validate()?;
        Ok(payload)
    }

    pub fn validate(&self) -> Result<(), TransferPayloadError> {
        if self.schema_version != COLUMN_TRANSFER_SCHEMA_VERSION {
            return Err(TransferPayloadError::UnsupportedSchemaVersion {
                version: self.schema_version,
                expected: COLUMN_TRANSFER_SCHEMA_VERSION,
            });
        }
        Ok(())
    }
}

/// Reasons a transfer channel holds no usable column payload.
#[derive(Debug, thiserror::Error)]
pub enum TransferPayloadError {
    #[error("no column payload under the \"Text\" format")]
    Missing,
    #[error("malformed column payload: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("unsupported column payload schema version {version} (expected {expected})")]
    UnsupportedSchemaVersion { version: u16, expected: u16 },
}
