//! Structured logging setup.
//!
//! The core logs through the `tracing` facade everywhere; this module owns the
//! one-time subscriber installation hosts opt into via
//! [`init_tracing`].

pub mod init;

pub use init::init_tracing;
