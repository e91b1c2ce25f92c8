//! Local persistence layer for user-marked membership.
//!
//! This module provides the storage abstraction behind the favorites and
//! event-registration ledgers: a blob-store trait, a JSON file implementation
//! with atomic writes, an in-memory fallback, and the versioned envelope
//! format written to disk.
//!
//! # Modules
//!
//! - `backend`: [`BlobStore`] trait abstraction
//! - `json`: JSON file implementation and in-memory fallback
//! - `ledger`: insertion-ordered membership set with synchronous persistence
//! - `models`: versioned on-disk envelope

pub mod backend;
pub mod json;
pub mod ledger;
pub mod models;

pub use backend::BlobStore;
pub use json::{JsonFileStore, MemoryStore};
pub use ledger::{Ledger, LedgerRecord};
pub use models::{LedgerData, LEDGER_FORMAT_VERSION};
