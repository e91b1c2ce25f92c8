//! Catalog domain models.
//!
//! This module defines the item types fetched from the data provider: games,
//! publishers, and community events, plus the supporting types shared by all
//! list screens (`ItemId`, `TagRef`, `CatalogPage`, `ListQuery`).
//!
//! Items are immutable once fetched; identity is the numeric `id`. The
//! [`CatalogItem`] trait is the seam between the domain and the derived-view
//! pipeline: it exposes exactly the fields the pipeline filters and sorts on,
//! so the pipeline stays generic over games, publishers, and events.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Unique identifier of a catalog item.
///
/// Serialized transparently as the underlying integer, matching the provider's
/// wire format and the persisted registration ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub i64);

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl From<i64> for ItemId {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

impl From<i32> for ItemId {
    fn from(raw: i32) -> Self {
        Self(i64::from(raw))
    }
}

/// A named reference attached to a game: tag, genre, publisher, or platform.
///
/// The `slug` is the provider's URL-friendly identifier and is absent for
/// reference kinds that are not individually routable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagRef {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
}

/// A video game as returned by the data provider.
///
/// Optional fields mirror the provider's sparse payloads: list endpoints omit
/// the description and reference sequences that only the details endpoint
/// carries. The full struct doubles as the favorites ledger snapshot, so a
/// favorited game renders without re-fetching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub id: ItemId,
    pub name: String,

    /// Average rating, absent for unrated titles.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,

    /// Release date as a `YYYY-MM-DD` string; unannounced titles have none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub released: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_image: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<TagRef>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub genres: Vec<TagRef>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub publishers: Vec<TagRef>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub platforms: Vec<TagRef>,
}

impl Game {
    /// Creates a game with only the fields every provider payload carries.
    ///
    /// Intended for construction sites that fill in optional fields afterwards
    /// with struct update syntax.
    #[must_use]
    pub fn new(id: impl Into<ItemId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            rating: None,
            released: None,
            background_image: None,
            description: None,
            tags: Vec::new(),
            genres: Vec::new(),
            publishers: Vec::new(),
            platforms: Vec::new(),
        }
    }

    /// Parses the release date string.
    ///
    /// Returns `None` for absent or unparseable dates; the derived-view
    /// pipeline treats both the same way (sorted after all dated items).
    #[must_use]
    pub fn released_date(&self) -> Option<NaiveDate> {
        self.released
            .as_deref()
            .and_then(|raw| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok())
    }
}

/// A game publisher as returned by the data provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Publisher {
    pub id: ItemId,
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub games_count: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_background: Option<String>,
}

/// A community event: expo, meetup, tournament.
///
/// The `date` is display text, not a sortable timestamp; events are rendered
/// in fetch order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameEvent {
    pub id: ItemId,
    pub title: String,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub date: String,
    pub description: String,
}

/// One provider page of items plus the full result count.
///
/// `total_count` covers the whole result set across pages, not this page's
/// length; pagination arithmetic derives the page count from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogPage<T> {
    pub items: Vec<T>,
    pub total_count: usize,
}

/// Query parameters for a paginated list fetch.
///
/// `page` is 1-based. Changing the search term resets the page to 1; the list
/// store enforces that invariant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQuery {
    pub search_term: String,
    pub page: usize,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            page: 1,
        }
    }
}

/// Fields the derived-view pipeline filters and sorts on.
///
/// Implemented by every item type that flows through a list screen. Types
/// without a rating or release date return `None` and keep their fetch order
/// under those sort options.
pub trait CatalogItem {
    /// Stable identity used for ledger membership.
    fn item_id(&self) -> ItemId;

    /// Name shown in lists and matched by local search refinement.
    fn display_name(&self) -> &str;

    /// Rating for the descending rating sort, if the item has one.
    fn rating(&self) -> Option<f64> {
        None
    }

    /// Parsed release date for the descending date sort, if the item has one.
    fn release_date(&self) -> Option<NaiveDate> {
        None
    }
}

impl CatalogItem for Game {
    fn item_id(&self) -> ItemId {
        self.id
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn rating(&self) -> Option<f64> {
        self.rating
    }

    fn release_date(&self) -> Option<NaiveDate> {
        self.released_date()
    }
}

impl CatalogItem for Publisher {
    fn item_id(&self) -> ItemId {
        self.id
    }

    fn display_name(&self) -> &str {
        &self.name
    }
}

impl CatalogItem for GameEvent {
    fn item_id(&self) -> ItemId {
        self.id
    }

    fn display_name(&self) -> &str {
        &self.title
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn released_date_parses_iso_dates() {
        let mut game = Game::new(1, "Grand Theft Auto V");
        game.released = Some("2013-09-17".to_string());
        assert_eq!(
            game.released_date(),
            NaiveDate::from_ymd_opt(2013, 9, 17)
        );
    }

    #[test]
    fn released_date_treats_garbage_as_missing() {
        let mut game = Game::new(2, "TBA Title");
        game.released = Some("sometime soon".to_string());
        assert_eq!(game.released_date(), None);

        game.released = None;
        assert_eq!(game.released_date(), None);
    }

    #[test]
    fn item_id_serializes_transparently() {
        let id = ItemId(42);
        assert_eq!(serde_json::to_string(&id).unwrap(), "42");
        let back: ItemId = serde_json::from_str("42").unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn game_roundtrips_through_json() {
        let mut game = Game::new(3, "Portal 2");
        game.rating = Some(4.6);
        game.genres.push(TagRef {
            id: 7,
            name: "Puzzle".to_string(),
            slug: Some("puzzle".to_string()),
        });

        let json = serde_json::to_string(&game).unwrap();
        let back: Game = serde_json::from_str(&json).unwrap();
        assert_eq!(back, game);
    }
}
