//! Data provider boundary.
//!
//! This module owns the seam to the external data source: the provider trait,
//! the token-carrying request/response protocol, the bridge that executes
//! requests, and the bundled sample catalog.
//!
//! # Architecture
//!
//! - `backend`: [`CatalogProvider`] trait abstraction
//! - `messages`: request/response protocol with request tokens
//! - `handler`: request execution and error folding
//! - `sample`: bundled events data and in-memory provider

pub mod backend;
pub mod handler;
pub mod messages;
pub mod sample;

pub use backend::CatalogProvider;
pub use handler::ProviderBridge;
pub use messages::{ProviderRequest, ProviderResponse, RequestToken};
pub use sample::{sample_events, SampleCatalog};
