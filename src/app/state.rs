//! Application state container and derived-view accessors.
//!
//! This module defines [`AppState`], the explicit state struct the surrounding
//! application owns and passes by reference; there is no ambient singleton.
//! It composes one [`ListStore`] per list screen (games, publishers, events),
//! a [`DetailStore`] for the game-details screen, and the two membership
//! ledgers (favorites, event registrations).
//!
//! # State Components
//!
//! - **List stores**: canonical fetched items, total count, load phase, and
//!   query state (search term + page), all mutated through defined methods
//! - **Ledgers**: user-marked membership, independent of the fetched lists;
//!   neither slice ever mutates the other directly
//! - **View options**: sort selections, the events filter, and the favorites
//!   screen's local refinement query
//!
//! # Derived Views
//!
//! Screens pull their render state through the `*_view()` accessors, which
//! feed the stores and ledgers through the pure pipeline in
//! [`crate::view::pipeline`]. Views are recomputed on demand, never cached or
//! pushed.
//!
//! # Fetch Concurrency
//!
//! Every fetch is issued with a token from [`AppState::issue_token`]; a store
//! records the latest token it issued and applies only the completion carrying
//! that token. Completions for any earlier token are stale and discarded, so
//! out-of-order arrivals can never clobber the newest request's result.

use crate::app::modes::{EventFilter, LoadPhase, SortOption};
use crate::domain::{CatalogPage, Game, GameEvent, ItemId, ListQuery, Publisher};
use crate::provider::messages::RequestToken;
use crate::storage::Ledger;
use crate::view::pipeline::{derive_view, page_count, DerivedView, ViewQuery};

/// Canonical state of one fetch-backed, paginated list.
///
/// Holds the most recently *resolved* items for the current query along with
/// the query itself. The invariants of the list contract live here: changing
/// the search term resets the page to 1, out-of-range pages are rejected, a
/// failed fetch leaves prior items untouched, and only the latest-issued
/// fetch's completion is applied.
#[derive(Debug)]
pub struct ListStore<T> {
    /// Items of the last resolved fetch, in fetch order.
    pub items: Vec<T>,

    /// Full result count across pages, as reported by the provider.
    pub total_count: usize,

    /// Where the store is in the `Idle → Loading → {Ready, Failed}` machine.
    pub phase: LoadPhase,

    /// Current search term. Sent to the provider, not applied locally.
    pub search_term: String,

    /// Current 1-based page.
    pub page: usize,

    /// Token of the latest issued fetch; completions must match it.
    latest_token: Option<RequestToken>,
}

impl<T> Default for ListStore<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total_count: 0,
            phase: LoadPhase::Idle,
            search_term: String::new(),
            page: 1,
            latest_token: None,
        }
    }
}

impl<T> ListStore<T> {
    /// Creates an empty store in the idle phase.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The query a fetch for this store should carry right now.
    #[must_use]
    pub fn query(&self) -> ListQuery {
        ListQuery {
            search_term: self.search_term.clone(),
            page: self.page,
        }
    }

    /// Pages in the current result set.
    #[must_use]
    pub fn page_count(&self) -> usize {
        page_count(self.total_count)
    }

    /// Marks a fetch as in flight under `token`.
    ///
    /// Enters `Loading` and clears any prior error. Items from the last
    /// resolved fetch stay in place until the new one resolves.
    pub fn begin_load(&mut self, token: RequestToken) {
        self.phase = LoadPhase::Loading;
        self.latest_token = Some(token);
        tracing::debug!(token = %token, "list fetch issued");
    }

    /// Updates the search term and resets the page to 1.
    ///
    /// Does not itself issue a fetch; the event handler re-fetches after every
    /// accepted query change.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        self.page = 1;
    }

    /// Moves to page `n` if it is within `[1, page_count]`.
    ///
    /// Out-of-range requests are silent no-ops returning `false`: a
    /// validation no-op, not an error.
    pub fn set_page(&mut self, n: usize) -> bool {
        if n < 1 || n > self.page_count() {
            tracing::debug!(
                requested = n,
                page_count = self.page_count(),
                "page request out of range, ignoring"
            );
            return false;
        }
        self.page = n;
        true
    }

    /// Applies a successful completion, if it is the latest-issued one.
    ///
    /// Stale completions (token mismatch) are discarded and logged; the return
    /// value says whether state changed.
    pub fn resolve_page(&mut self, token: RequestToken, page: CatalogPage<T>) -> bool {
        if !self.claims(token) {
            return false;
        }
        self.items = page.items;
        self.total_count = page.total_count;
        self.phase = LoadPhase::Ready;
        tracing::debug!(
            token = %token,
            items = self.items.len(),
            total = self.total_count,
            "list fetch resolved"
        );
        true
    }

    /// Applies a failed completion, if it is the latest-issued one.
    ///
    /// Enters `Failed` with the message; previously resolved items are kept so
    /// the screen can show them alongside the error.
    pub fn resolve_error(&mut self, token: RequestToken, message: &str) -> bool {
        if !self.claims(token) {
            return false;
        }
        self.phase = LoadPhase::Failed(message.to_string());
        tracing::debug!(token = %token, error = %message, "list fetch failed");
        true
    }

    fn claims(&self, token: RequestToken) -> bool {
        if self.latest_token == Some(token) {
            true
        } else {
            tracing::debug!(token = %token, latest = ?self.latest_token, "stale completion discarded");
            false
        }
    }
}

/// State of the game-details screen.
///
/// Same token discipline as [`ListStore`], holding a single optional item.
/// Cleared wholesale when the user navigates away.
#[derive(Debug, Default)]
pub struct DetailStore {
    /// The currently shown game, if the latest fetch resolved.
    pub game: Option<Game>,

    /// Load phase of the latest details fetch.
    pub phase: LoadPhase,

    latest_token: Option<RequestToken>,
}

impl DetailStore {
    /// Marks a details fetch as in flight under `token`.
    pub fn begin_load(&mut self, token: RequestToken) {
        self.phase = LoadPhase::Loading;
        self.latest_token = Some(token);
    }

    /// Applies a resolved details fetch, if it is the latest-issued one.
    pub fn resolve(&mut self, token: RequestToken, game: Game) -> bool {
        if self.latest_token != Some(token) {
            tracing::debug!(token = %token, "stale details completion discarded");
            return false;
        }
        self.game = Some(game);
        self.phase = LoadPhase::Ready;
        true
    }

    /// Applies a failed details fetch, if it is the latest-issued one.
    pub fn resolve_error(&mut self, token: RequestToken, message: &str) -> bool {
        if self.latest_token != Some(token) {
            return false;
        }
        self.phase = LoadPhase::Failed(message.to_string());
        true
    }

    /// Clears the screen's state on navigation away.
    pub fn clear(&mut self) {
        self.game = None;
        self.phase = LoadPhase::Idle;
        self.latest_token = None;
    }
}

/// Central application state.
///
/// Mutated only by [`handle_event`](crate::app::handle_event); read by the
/// presentation layer through the view accessors. The store slices and the
/// ledgers are independent: toggling a favorite never touches the games list,
/// and a fetch never touches a ledger.
pub struct AppState {
    /// Games list screen.
    pub games: ListStore<Game>,

    /// Publishers list screen.
    pub publishers: ListStore<Publisher>,

    /// Community-events list screen. Locally paginated; its search term is
    /// unused because the events endpoint takes no query.
    pub events: ListStore<GameEvent>,

    /// Game-details screen.
    pub details: DetailStore,

    /// Favorited games with their snapshots.
    pub favorites: Ledger<Game>,

    /// Registered event ids.
    pub registrations: Ledger<ItemId>,

    /// Sort selection on the games screen.
    pub games_sort: SortOption,

    /// Sort selection on the favorites screen.
    pub favorites_sort: SortOption,

    /// Local refinement query on the favorites screen.
    pub favorites_query: String,

    /// Current 1-based page of the favorites screen.
    pub favorites_page: usize,

    /// Base filter on the events screen.
    pub event_filter: EventFilter,

    /// Source of strictly increasing request tokens.
    next_token: u64,
}

impl AppState {
    /// Creates the application state around loaded ledgers.
    ///
    /// List stores start empty and idle; the first render should trigger the
    /// load events for whichever screens are visible.
    #[must_use]
    pub fn new(favorites: Ledger<Game>, registrations: Ledger<ItemId>) -> Self {
        Self {
            games: ListStore::new(),
            publishers: ListStore::new(),
            events: ListStore::new(),
            details: DetailStore::default(),
            favorites,
            registrations,
            games_sort: SortOption::None,
            favorites_sort: SortOption::None,
            favorites_query: String::new(),
            favorites_page: 1,
            event_filter: EventFilter::All,
            next_token: 0,
        }
    }

    /// Issues the next request token.
    ///
    /// Tokens are unique and strictly increasing across all stores, which is
    /// what makes last-issued-wins resolution unambiguous.
    pub fn issue_token(&mut self) -> RequestToken {
        self.next_token += 1;
        RequestToken(self.next_token)
    }

    /// Whether a game is currently favorited.
    #[must_use]
    pub fn is_favorite(&self, id: ItemId) -> bool {
        self.favorites.is_member(id)
    }

    /// Whether the user is registered for an event.
    #[must_use]
    pub fn is_registered(&self, id: ItemId) -> bool {
        self.registrations.is_member(id)
    }

    /// The games screen's render sequence.
    ///
    /// The provider already sliced the page, so the items pass through the
    /// sort whole and the page count comes from the reported total.
    #[must_use]
    pub fn games_view(&self) -> DerivedView<Game> {
        derive_view(
            &self.games.items,
            &ViewQuery::remote(self.games_sort, self.games.page, self.games.total_count),
        )
    }

    /// The publishers screen's render sequence, in fetch order.
    #[must_use]
    pub fn publishers_view(&self) -> DerivedView<Publisher> {
        derive_view(
            &self.publishers.items,
            &ViewQuery::remote(
                SortOption::None,
                self.publishers.page,
                self.publishers.total_count,
            ),
        )
    }

    /// The events screen's render sequence.
    ///
    /// Under the registered filter only ledger members remain; the page count
    /// then reflects the filtered length.
    #[must_use]
    pub fn events_view(&self) -> DerivedView<GameEvent> {
        let query = ViewQuery::local(SortOption::None, self.events.page);
        let query = match self.event_filter {
            EventFilter::All => query,
            EventFilter::Registered => query.with_members(self.registrations.id_set()),
        };
        derive_view(&self.events.items, &query)
    }

    /// The favorites screen's render sequence, from ledger snapshots.
    ///
    /// Renders without re-fetching: the snapshots show each game as it was
    /// when favorited. Sorted by the screen's own sort option and refined by
    /// its local query.
    #[must_use]
    pub fn favorites_view(&self) -> DerivedView<Game> {
        let mut query = ViewQuery::local(self.favorites_sort, self.favorites_page);
        if !self.favorites_query.is_empty() {
            query = query.with_refine(&self.favorites_query);
        }
        derive_view(self.favorites.list(), &query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn state() -> AppState {
        AppState::new(
            Ledger::load("favorites", Box::new(MemoryStore::new())),
            Ledger::load("registered_events", Box::new(MemoryStore::new())),
        )
    }

    fn page_of(n: usize, total: usize) -> CatalogPage<Game> {
        CatalogPage {
            items: (0..n).map(|i| Game::new(i as i64, format!("g{i}"))).collect(),
            total_count: total,
        }
    }

    #[test]
    fn tokens_are_strictly_increasing() {
        let mut s = state();
        let a = s.issue_token();
        let b = s.issue_token();
        assert!(b.0 > a.0);
    }

    #[test]
    fn search_term_change_resets_page_for_any_prior_page() {
        for prior in [1usize, 2, 3, 17] {
            let mut store: ListStore<Game> = ListStore::new();
            store.total_count = 400;
            store.page = prior;
            store.set_search_term("zelda");
            assert_eq!(store.page, 1);
            assert_eq!(store.search_term, "zelda");
        }
    }

    #[test]
    fn out_of_range_pages_leave_the_page_unchanged() {
        let mut store: ListStore<Game> = ListStore::new();
        store.total_count = 45; // 3 pages
        store.page = 2;

        assert!(!store.set_page(0));
        assert_eq!(store.page, 2);
        assert!(!store.set_page(4));
        assert_eq!(store.page, 2);
        assert!(store.set_page(3));
        assert_eq!(store.page, 3);
    }

    #[test]
    fn stale_completion_is_discarded_in_favor_of_the_latest() {
        let mut store: ListStore<Game> = ListStore::new();

        let first = RequestToken(1);
        let second = RequestToken(2);
        store.begin_load(first);
        store.begin_load(second);

        // Token 2 resolves first; token 1 arrives late and must be dropped.
        assert!(store.resolve_page(second, page_of(2, 2)));
        assert!(!store.resolve_page(first, page_of(9, 9)));

        assert_eq!(store.items.len(), 2);
        assert_eq!(store.total_count, 2);
        assert_eq!(store.phase, LoadPhase::Ready);
    }

    #[test]
    fn failure_keeps_previous_items() {
        let mut store: ListStore<Game> = ListStore::new();

        let first = store_token(&mut store, 1);
        assert!(store.resolve_page(first, page_of(3, 3)));

        let second = store_token(&mut store, 2);
        assert!(store.phase.is_loading());
        assert!(store.resolve_error(second, "provider down"));

        assert_eq!(store.items.len(), 3);
        assert_eq!(store.phase.error(), Some("provider down"));
    }

    #[test]
    fn stale_error_is_discarded() {
        let mut store: ListStore<Game> = ListStore::new();
        let first = store_token(&mut store, 1);
        let _second = store_token(&mut store, 2);

        assert!(!store.resolve_error(first, "too late"));
        assert!(store.phase.is_loading());
    }

    fn store_token(store: &mut ListStore<Game>, raw: u64) -> RequestToken {
        let token = RequestToken(raw);
        store.begin_load(token);
        token
    }

    #[test]
    fn details_clear_wipes_everything() {
        let mut details = DetailStore::default();
        let token = RequestToken(1);
        details.begin_load(token);
        assert!(details.resolve(token, Game::new(1, "Portal")));
        assert!(details.game.is_some());

        details.clear();
        assert!(details.game.is_none());
        assert_eq!(details.phase, LoadPhase::Idle);
    }

    #[test]
    fn events_view_respects_the_registered_filter() {
        let mut s = state();
        s.events.items = vec![
            GameEvent {
                id: ItemId(1),
                title: "Expo".to_string(),
                location: "NY".to_string(),
                image: None,
                date: "June".to_string(),
                description: String::new(),
            },
            GameEvent {
                id: ItemId(2),
                title: "Meetup".to_string(),
                location: "SF".to_string(),
                image: None,
                date: "July".to_string(),
                description: String::new(),
            },
        ];
        s.events.total_count = 2;
        s.registrations.toggle(ItemId(2));

        assert_eq!(s.events_view().items.len(), 2);

        s.event_filter = EventFilter::Registered;
        let view = s.events_view();
        assert_eq!(view.items.len(), 1);
        assert_eq!(view.items[0].id, ItemId(2));
    }
}
