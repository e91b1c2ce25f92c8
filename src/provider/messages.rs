//! Request/response protocol between the core and the provider boundary.
//!
//! This module defines the message types the event handler emits (wrapped in
//! [`Action::Dispatch`](crate::app::Action)) and the responses the host feeds
//! back as events. Every message carries a [`RequestToken`]; tokens are issued
//! in strictly increasing order and are how the list stores detect and discard
//! stale completions (last-issued-wins, see the concurrency notes on
//! [`ListStore`](crate::app::state::ListStore)).

use crate::domain::{CatalogPage, Game, GameEvent, ItemId, ListQuery, Publisher};
use serde::{Deserialize, Serialize};

/// Identifier of one in-flight fetch.
///
/// Issued by [`AppState::issue_token`](crate::app::AppState::issue_token) in
/// strictly increasing order. A completion is applied only if its token equals
/// the latest token the target store issued; anything else is stale and
/// dropped at resolution time. There is no cancellation API: discarding
/// stale results is the cancellation substitute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestToken(pub u64);

impl std::fmt::Display for RequestToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Fetches the core asks the host to run against the provider.
///
/// Emitted by the event handler; executed by the host (directly through
/// [`ProviderBridge`](crate::provider::ProviderBridge) or on its own
/// executor). Serializable so hosts that run the provider out-of-process can
/// ship requests across the boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ProviderRequest {
    /// Load one page of games for the given query.
    FetchGames {
        query: ListQuery,
        token: RequestToken,
    },

    /// Load the full record for a single game.
    FetchGameDetails { id: ItemId, token: RequestToken },

    /// Load one page of publishers for the given query.
    FetchPublishers {
        query: ListQuery,
        token: RequestToken,
    },

    /// Load the community-events list.
    FetchEvents { token: RequestToken },
}

impl ProviderRequest {
    /// The token this request was issued with.
    #[must_use]
    pub fn token(&self) -> RequestToken {
        match self {
            Self::FetchGames { token, .. }
            | Self::FetchGameDetails { token, .. }
            | Self::FetchPublishers { token, .. }
            | Self::FetchEvents { token } => *token,
        }
    }
}

/// Completions fed back into the core as events.
///
/// Responses may arrive in any order; the stores apply only the one matching
/// their latest issued token. An [`Error`](Self::Error) carries just its
/// token; whichever store issued that token claims the failure, so stale
/// errors die exactly like stale successes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ProviderResponse {
    /// A games page resolved.
    GamesLoaded {
        token: RequestToken,
        page: CatalogPage<Game>,
    },

    /// A game-details fetch resolved.
    GameDetailsLoaded { token: RequestToken, game: Game },

    /// A publishers page resolved.
    PublishersLoaded {
        token: RequestToken,
        page: CatalogPage<Publisher>,
    },

    /// The events list resolved.
    EventsLoaded {
        token: RequestToken,
        events: Vec<GameEvent>,
    },

    /// A fetch failed with a human-readable message.
    Error {
        token: RequestToken,
        message: String,
    },
}

impl ProviderResponse {
    /// The token of the request this response completes.
    #[must_use]
    pub fn token(&self) -> RequestToken {
        match self {
            Self::GamesLoaded { token, .. }
            | Self::GameDetailsLoaded { token, .. }
            | Self::PublishersLoaded { token, .. }
            | Self::EventsLoaded { token, .. }
            | Self::Error { token, .. } => *token,
        }
    }
}
