//! Error types for the catalog browser core.
//!
//! This module defines the centralized error type [`CatalogError`] and a type alias
//! [`Result`] for convenient error handling throughout the crate. All errors are
//! implemented using the `thiserror` crate for automatic `Error` trait implementation.
//!
//! Out-of-range page requests and duplicate ledger toggles are deliberately *not*
//! errors: they are silent no-ops handled at the call site.

use thiserror::Error;

/// The main error type for catalog browser operations.
///
/// This enum consolidates all error conditions that can occur in the core, from
/// provider fetches to persistence and configuration. Provider and storage failures
/// are caught at the point of call and converted into state; nothing in the core
/// crashes the process on bad external input.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A data provider fetch failed.
    ///
    /// Carries the provider's human-readable message. Surfaced to the view as a
    /// `Failed` load phase; never clears previously resolved items.
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// A local persistence read or write failed.
    ///
    /// Logged at the point of call; the ledger degrades to in-memory-only rather
    /// than propagating this to the user as a fatal condition.
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Filesystem or I/O operation failed.
    ///
    /// Wraps errors from standard library I/O operations. Automatically converts
    /// from `std::io::Error` using the `#[from]` attribute.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration is invalid or missing.
    ///
    /// Occurs when a configuration file cannot be parsed or carries malformed
    /// values. The string describes the specific configuration problem.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A specialized `Result` type for catalog operations.
///
/// Type alias for `std::result::Result<T, CatalogError>` that simplifies function
/// signatures throughout the crate.
pub type Result<T> = std::result::Result<T, CatalogError>;
