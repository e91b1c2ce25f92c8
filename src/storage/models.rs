//! Persisted ledger container format.
//!
//! This module defines the versioned envelope written to storage for every
//! ledger, separate from the domain models it carries. Keeping an explicit
//! version on disk lets a future format change migrate or reject old payloads
//! instead of silently misreading them.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Current on-disk ledger format version.
pub const LEDGER_FORMAT_VERSION: u32 = 1;

/// Versioned envelope for a persisted ledger.
///
/// This is the top-level structure serialized to disk. The `entries` sequence
/// preserves insertion order, which is the only ordering guarantee the ledger
/// makes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerData<R> {
    /// Version of the storage format for future migrations.
    pub version: u32,

    /// Ledger members in insertion order.
    #[serde(default = "Vec::new")]
    pub entries: Vec<R>,
}

impl<R> LedgerData<R> {
    /// Wraps entries in a current-version envelope for writing.
    #[must_use]
    pub fn current(entries: Vec<R>) -> Self {
        Self {
            version: LEDGER_FORMAT_VERSION,
            entries,
        }
    }

    /// Creates an empty current-version ledger.
    #[must_use]
    pub fn empty() -> Self {
        Self::current(Vec::new())
    }
}

impl<R: DeserializeOwned> LedgerData<R> {
    /// Decodes a persisted payload, tolerating every malformed input.
    ///
    /// Unparseable JSON and unknown versions both decode to an empty ledger:
    /// startup must never fail on bad persisted state. A version mismatch is
    /// logged so the data loss is observable.
    #[must_use]
    pub fn decode(payload: &str) -> Self {
        match serde_json::from_str::<Self>(payload) {
            Ok(data) if data.version == LEDGER_FORMAT_VERSION => data,
            Ok(data) => {
                tracing::warn!(
                    found = data.version,
                    expected = LEDGER_FORMAT_VERSION,
                    "unknown ledger format version, starting empty"
                );
                Self::empty()
            }
            Err(e) => {
                tracing::warn!(error = %e, "corrupt ledger payload, starting empty");
                Self::empty()
            }
        }
    }
}
