//! Persistence backend abstraction.
//!
//! This module defines the [`BlobStore`] trait that abstracts over local
//! persistence backends. The ledger layers typed, versioned records on top of
//! it; the trait itself only moves named string payloads.
//!
//! # Design Philosophy
//!
//! The trait is minimal on purpose: one readable and one writable named blob
//! per ledger. Missing keys read as `None` rather than erroring, so a fresh
//! installation and a wiped store are indistinguishable from the caller's
//! point of view.

use crate::domain::error::Result;

/// Abstraction over local persistence backends.
///
/// # Implementations
///
/// - [`JsonFileStore`](crate::storage::JsonFileStore): one JSON file per key
///   with atomic writes (default)
/// - [`MemoryStore`](crate::storage::MemoryStore): in-memory map, used as the
///   degradation target when the filesystem is unavailable and in tests
pub trait BlobStore: Send {
    /// Reads the payload stored under `key`.
    ///
    /// Returns `Ok(None)` when the key has never been written. Backends that
    /// can distinguish "present but unreadable" from "absent" report the
    /// former as an error; the ledger treats both as an empty starting point.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying read fails.
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Writes `payload` under `key`, replacing any previous value.
    ///
    /// The write must be atomic with respect to crashes: a reader never
    /// observes a half-written payload.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying write fails.
    fn write(&mut self, key: &str, payload: &str) -> Result<()>;
}
