//! Event handling and state transition logic.
//!
//! This module implements the event handler that processes screen actions and
//! provider completions, translating them into state changes and fetch
//! dispatches. It is the only place [`AppState`] is mutated.
//!
//! # Architecture
//!
//! The handler follows a unidirectional data flow pattern:
//!
//! 1. Events arrive from the presentation layer or the provider boundary
//! 2. [`handle_event`] pattern-matches the event type
//! 3. State mutations occur via store and ledger methods
//! 4. Fetch actions are collected and returned for the host to execute
//!
//! The returned `bool` says whether the derived views may have changed and a
//! re-render is worthwhile. Rejected page requests and stale completions
//! return `false` with no actions; they are no-ops end to end.
//!
//! # Reactive re-fetch
//!
//! Query mutations (`set_search_term`, accepted `set_page`) do not fetch by
//! themselves; this handler is the caller responsible for issuing the re-fetch
//! after every accepted query change, which it does in the same turn.

use crate::app::modes::{EventFilter, SortOption};
use crate::app::{Action, AppState};
use crate::domain::error::Result;
use crate::domain::{CatalogPage, Game, ItemId};
use crate::provider::messages::{ProviderRequest, ProviderResponse};

/// Events triggered by screen interactions or provider completions.
///
/// Each event represents a discrete occurrence that may cause state changes
/// and fetch dispatches. The handler processes them sequentially, ensuring
/// deterministic state transitions.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Loads (or reloads) the games list for the current query.
    LoadGames,
    /// Updates the games search term, resets to page 1, and re-fetches.
    GamesSearchChanged(String),
    /// Moves the games list to a page; rejected outside `[1, page_count]`.
    GamesPageChanged(usize),
    /// Changes the games screen sort option.
    GamesSortChanged(SortOption),
    /// Toggles a game in the favorites ledger, storing the full snapshot.
    ToggleFavorite(Game),

    /// Opens the details screen for a game and fetches its full record.
    OpenGameDetails(ItemId),
    /// Clears the details screen on navigation away.
    CloseGameDetails,

    /// Loads (or reloads) the publishers list for the current query.
    LoadPublishers,
    /// Updates the publishers search term, resets to page 1, and re-fetches.
    PublishersSearchChanged(String),
    /// Moves the publishers list to a page; rejected outside range.
    PublishersPageChanged(usize),

    /// Loads (or reloads) the community-events list.
    LoadEvents,
    /// Switches the events screen between all and registered-only.
    EventFilterChanged(EventFilter),
    /// Moves the events screen to a page of the (filtered) view.
    EventsPageChanged(usize),
    /// Toggles an event id in the registration ledger.
    ToggleRegistration(ItemId),

    /// Changes the favorites screen sort option.
    FavoritesSortChanged(SortOption),
    /// Updates the favorites screen's local refinement query.
    FavoritesQueryChanged(String),
    /// Moves the favorites screen to a page of the refined view.
    FavoritesPageChanged(usize),

    /// Wraps a completion from the provider boundary.
    ///
    /// Completions may arrive in any order; each store applies only the one
    /// matching its latest issued token and discards the rest.
    Provider(ProviderResponse),
}

/// Processes an event, mutates application state, and returns what to do next.
///
/// # Returns
///
/// `(render_needed, actions)`: whether the derived views may have changed, and
/// the fetches the host should execute. Both are empty/false for no-ops such
/// as out-of-range page requests and stale completions.
///
/// # Errors
///
/// Reserved for state mutations that can fail; every current transition
/// converts its failures into state instead (failed fetches become the
/// `Failed` phase, persistence failures degrade the ledger in place).
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?std::mem::discriminant(event)).entered();

    match event {
        Event::LoadGames => Ok((true, vec![fetch_games(state)])),
        Event::GamesSearchChanged(term) => {
            state.games.set_search_term(term.clone());
            tracing::debug!(term = %term, "games search changed");
            Ok((true, vec![fetch_games(state)]))
        }
        Event::GamesPageChanged(n) => {
            if state.games.set_page(*n) {
                Ok((true, vec![fetch_games(state)]))
            } else {
                Ok((false, vec![]))
            }
        }
        Event::GamesSortChanged(sort) => {
            state.games_sort = *sort;
            Ok((true, vec![]))
        }
        Event::ToggleFavorite(game) => {
            let member = state.favorites.toggle(game.clone());
            tracing::debug!(game_id = %game.id, member = member, "favorite toggled");
            clamp_favorites_page(state);
            Ok((true, vec![]))
        }

        Event::OpenGameDetails(id) => {
            let token = state.issue_token();
            state.details.begin_load(token);
            tracing::debug!(game_id = %id, token = %token, "opening game details");
            Ok((
                true,
                vec![Action::Dispatch(ProviderRequest::FetchGameDetails {
                    id: *id,
                    token,
                })],
            ))
        }
        Event::CloseGameDetails => {
            state.details.clear();
            Ok((true, vec![]))
        }

        Event::LoadPublishers => Ok((true, vec![fetch_publishers(state)])),
        Event::PublishersSearchChanged(term) => {
            state.publishers.set_search_term(term.clone());
            Ok((true, vec![fetch_publishers(state)]))
        }
        Event::PublishersPageChanged(n) => {
            if state.publishers.set_page(*n) {
                Ok((true, vec![fetch_publishers(state)]))
            } else {
                Ok((false, vec![]))
            }
        }

        Event::LoadEvents => {
            let token = state.issue_token();
            state.events.begin_load(token);
            Ok((
                true,
                vec![Action::Dispatch(ProviderRequest::FetchEvents { token })],
            ))
        }
        Event::EventFilterChanged(filter) => {
            state.event_filter = *filter;
            state.events.page = 1;
            Ok((true, vec![]))
        }
        Event::EventsPageChanged(n) => {
            // Validated against the filtered view: under the registered
            // filter the page count shrinks to the member count.
            let pages = state.events_view().page_count;
            if *n >= 1 && *n <= pages {
                state.events.page = *n;
                Ok((true, vec![]))
            } else {
                tracing::debug!(requested = n, page_count = pages, "events page out of range");
                Ok((false, vec![]))
            }
        }
        Event::ToggleRegistration(id) => {
            let member = state.registrations.toggle(*id);
            tracing::debug!(event_id = %id, member = member, "registration toggled");
            clamp_events_page(state);
            Ok((true, vec![]))
        }

        Event::FavoritesSortChanged(sort) => {
            state.favorites_sort = *sort;
            Ok((true, vec![]))
        }
        Event::FavoritesQueryChanged(query) => {
            state.favorites_query = query.clone();
            state.favorites_page = 1;
            Ok((true, vec![]))
        }
        Event::FavoritesPageChanged(n) => {
            let pages = state.favorites_view().page_count;
            if *n >= 1 && *n <= pages {
                state.favorites_page = *n;
                Ok((true, vec![]))
            } else {
                Ok((false, vec![]))
            }
        }

        Event::Provider(response) => Ok((apply_response(state, response), vec![])),
    }
}

/// Issues a games fetch for the store's current query.
fn fetch_games(state: &mut AppState) -> Action {
    let token = state.issue_token();
    state.games.begin_load(token);
    Action::Dispatch(ProviderRequest::FetchGames {
        query: state.games.query(),
        token,
    })
}

/// Issues a publishers fetch for the store's current query.
fn fetch_publishers(state: &mut AppState) -> Action {
    let token = state.issue_token();
    state.publishers.begin_load(token);
    Action::Dispatch(ProviderRequest::FetchPublishers {
        query: state.publishers.query(),
        token,
    })
}

/// Applies a provider completion to whichever store issued its token.
///
/// Returns whether any store claimed it; stale completions change nothing.
fn apply_response(state: &mut AppState, response: &ProviderResponse) -> bool {
    match response {
        ProviderResponse::GamesLoaded { token, page } => {
            state.games.resolve_page(*token, page.clone())
        }
        ProviderResponse::PublishersLoaded { token, page } => {
            state.publishers.resolve_page(*token, page.clone())
        }
        ProviderResponse::EventsLoaded { token, events } => {
            let page = CatalogPage {
                total_count: events.len(),
                items: events.clone(),
            };
            state.events.resolve_page(*token, page)
        }
        ProviderResponse::GameDetailsLoaded { token, game } => {
            state.details.resolve(*token, game.clone())
        }
        ProviderResponse::Error { token, message } => {
            // Exactly one store can have issued this token; the first claim
            // wins and the rest see a mismatch.
            state.games.resolve_error(*token, message)
                || state.publishers.resolve_error(*token, message)
                || state.events.resolve_error(*token, message)
                || state.details.resolve_error(*token, message)
        }
    }
}

/// Pulls the favorites page back into range after a removal shrank the view.
fn clamp_favorites_page(state: &mut AppState) {
    let pages = state.favorites_view().page_count;
    state.favorites_page = state.favorites_page.min(pages.max(1));
}

/// Pulls the events page back into range after a registration change shrank
/// the registered-only view.
fn clamp_events_page(state: &mut AppState) {
    let pages = state.events_view().page_count;
    state.events.page = state.events.page.min(pages.max(1));
}
