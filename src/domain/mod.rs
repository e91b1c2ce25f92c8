//! Domain layer for the catalog browser core.
//!
//! This module contains the catalog item types and error definitions,
//! independent of provider transport or persistence concerns.
//!
//! # Organization
//!
//! - [`error`]: Error types and result alias
//! - [`catalog`]: Item models and the [`CatalogItem`] pipeline seam

pub mod catalog;
pub mod error;

pub use catalog::{
    CatalogItem, CatalogPage, Game, GameEvent, ItemId, ListQuery, Publisher, TagRef,
};
pub use error::{CatalogError, Result};
