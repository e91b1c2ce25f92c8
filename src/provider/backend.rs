//! Data provider abstraction.
//!
//! This module defines the [`CatalogProvider`] trait, the external collaborator
//! that supplies raw item lists and details. The core never talks to a network
//! itself; the surrounding application implements this trait over whatever
//! transport it owns and runs it wherever it likes (its own thread, its own
//! executor). Timeouts and retries are the provider's policy, not the core's.

use crate::domain::error::Result;
use crate::domain::{CatalogPage, Game, GameEvent, ItemId, ListQuery, Publisher};

/// Abstraction over the external catalog data source.
///
/// Each method maps to one screen's fetch. Paginated endpoints take the full
/// [`ListQuery`] (search term + 1-based page) and return one page plus the
/// total result count; the provider owns the page slicing for those endpoints.
///
/// # Implementations
///
/// - [`SampleCatalog`](crate::provider::SampleCatalog): bundled sample data,
///   used by tests and demos
pub trait CatalogProvider: Send {
    /// Fetches one page of games matching the query.
    ///
    /// # Errors
    ///
    /// Returns an error carrying a human-readable message if the fetch fails.
    fn fetch_games(&mut self, query: &ListQuery) -> Result<CatalogPage<Game>>;

    /// Fetches the full record for a single game.
    ///
    /// # Errors
    ///
    /// Returns an error if the game does not exist or the fetch fails.
    fn fetch_game_details(&mut self, id: ItemId) -> Result<Game>;

    /// Fetches one page of publishers matching the query.
    ///
    /// # Errors
    ///
    /// Returns an error carrying a human-readable message if the fetch fails.
    fn fetch_publishers(&mut self, query: &ListQuery) -> Result<CatalogPage<Publisher>>;

    /// Fetches the full community-events list.
    ///
    /// The events collection is small and unpaginated at the provider; the
    /// derived-view pipeline paginates it locally.
    ///
    /// # Errors
    ///
    /// Returns an error carrying a human-readable message if the fetch fails.
    fn fetch_events(&mut self) -> Result<Vec<GameEvent>>;
}
