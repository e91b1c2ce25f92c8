//! Bundled sample catalog.
//!
//! The community-events screen ships with a static data set rather than a
//! remote endpoint; [`SampleCatalog`] serves it through the same
//! [`CatalogProvider`] seam as a real backend would. It also simulates
//! server-side search and pagination over whatever games and publishers it is
//! seeded with, which makes it the standard provider for tests and demos.

use crate::domain::error::{CatalogError, Result};
use crate::domain::{CatalogPage, Game, GameEvent, ItemId, ListQuery, Publisher};
use crate::provider::backend::CatalogProvider;
use crate::view::PAGE_SIZE;

/// The bundled community events.
#[must_use]
pub fn sample_events() -> Vec<GameEvent> {
    vec![
        GameEvent {
            id: ItemId(1),
            title: "Gaming Expo 2025".to_string(),
            location: "New York".to_string(),
            image: Some("gaming_expo.png".to_string()),
            date: "June 15-18, 2025".to_string(),
            description: "The year's biggest video game exposition with the latest releases and technology.".to_string(),
        },
        GameEvent {
            id: ItemId(2),
            title: "Indie Game Developers Meetup".to_string(),
            location: "San Francisco".to_string(),
            image: Some("indie_meetup.png".to_string()),
            date: "July 5, 2025".to_string(),
            description: "A gathering for independent developers to share ideas and experiences.".to_string(),
        },
        GameEvent {
            id: ItemId(3),
            title: "Esports Championship".to_string(),
            location: "Los Angeles".to_string(),
            image: Some("esports.png".to_string()),
            date: "August 22-24, 2025".to_string(),
            description: "International esports championship featuring the best teams in the world.".to_string(),
        },
        GameEvent {
            id: ItemId(4),
            title: "Retro Gaming Festival".to_string(),
            location: "Chicago".to_string(),
            image: Some("retro_gaming.png".to_string()),
            date: "September 10-12, 2025".to_string(),
            description: "A festival dedicated to classic video games with tournaments, exhibits, and talks.".to_string(),
        },
        GameEvent {
            id: ItemId(5),
            title: "Game Developers Conference".to_string(),
            location: "Boston".to_string(),
            image: Some("game_dev_conf.png".to_string()),
            date: "October 3-5, 2025".to_string(),
            description: "An industry conference with workshops and presentations.".to_string(),
        },
    ]
}

/// In-memory catalog provider over seeded data.
///
/// Games and publishers are searched with a case-insensitive substring match
/// on the name and sliced into pages of [`PAGE_SIZE`], mirroring how the real
/// list endpoints behave. Events are returned whole.
pub struct SampleCatalog {
    events: Vec<GameEvent>,
    games: Vec<Game>,
    publishers: Vec<Publisher>,
}

impl SampleCatalog {
    /// Creates a catalog with the bundled events and no games or publishers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            events: sample_events(),
            games: Vec::new(),
            publishers: Vec::new(),
        }
    }

    /// Seeds the catalog with games.
    #[must_use]
    pub fn with_games(mut self, games: Vec<Game>) -> Self {
        self.games = games;
        self
    }

    /// Seeds the catalog with publishers.
    #[must_use]
    pub fn with_publishers(mut self, publishers: Vec<Publisher>) -> Self {
        self.publishers = publishers;
        self
    }

    /// Server-side search + pagination simulation shared by the list endpoints.
    fn page_of<T: Clone>(
        items: &[T],
        query: &ListQuery,
        name_of: impl Fn(&T) -> &str,
    ) -> CatalogPage<T> {
        let needle = query.search_term.to_lowercase();
        let matching: Vec<&T> = items
            .iter()
            .filter(|item| needle.is_empty() || name_of(item).to_lowercase().contains(&needle))
            .collect();

        let total_count = matching.len();
        let start = query.page.saturating_sub(1).saturating_mul(PAGE_SIZE);
        let page_items = matching
            .into_iter()
            .skip(start)
            .take(PAGE_SIZE)
            .cloned()
            .collect();

        CatalogPage {
            items: page_items,
            total_count,
        }
    }
}

impl Default for SampleCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogProvider for SampleCatalog {
    fn fetch_games(&mut self, query: &ListQuery) -> Result<CatalogPage<Game>> {
        Ok(Self::page_of(&self.games, query, |game| &game.name))
    }

    fn fetch_game_details(&mut self, id: ItemId) -> Result<Game> {
        self.games
            .iter()
            .find(|game| game.id == id)
            .cloned()
            .ok_or_else(|| CatalogError::Fetch(format!("game {id} not found")))
    }

    fn fetch_publishers(&mut self, query: &ListQuery) -> Result<CatalogPage<Publisher>> {
        Ok(Self::page_of(&self.publishers, query, |publisher| {
            &publisher.name
        }))
    }

    fn fetch_events(&mut self) -> Result<Vec<GameEvent>> {
        Ok(self.events.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> SampleCatalog {
        let games = (1..=45i64)
            .map(|n| {
                let mut game = Game::new(n, format!("Game {n:02}"));
                game.rating = Some(f64::from(n as i32) / 10.0);
                game
            })
            .collect();
        SampleCatalog::new().with_games(games)
    }

    #[test]
    fn bundled_events_are_served_whole() {
        let mut catalog = SampleCatalog::new();
        let events = catalog.fetch_events().unwrap();
        assert_eq!(events.len(), 5);
        assert_eq!(events[0].title, "Gaming Expo 2025");
    }

    #[test]
    fn games_are_sliced_into_pages_with_full_total() {
        let mut catalog = seeded();

        let first = catalog.fetch_games(&ListQuery::default()).unwrap();
        assert_eq!(first.items.len(), 20);
        assert_eq!(first.total_count, 45);

        let last = catalog
            .fetch_games(&ListQuery {
                search_term: String::new(),
                page: 3,
            })
            .unwrap();
        assert_eq!(last.items.len(), 5);
        assert_eq!(last.total_count, 45);
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let mut catalog = seeded();
        let page = catalog
            .fetch_games(&ListQuery {
                search_term: "game 0".to_string(),
                page: 1,
            })
            .unwrap();
        // "Game 01" through "Game 09".
        assert_eq!(page.total_count, 9);
    }

    #[test]
    fn details_miss_is_a_fetch_error() {
        let mut catalog = SampleCatalog::new();
        let err = catalog.fetch_game_details(ItemId(999)).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }
}
