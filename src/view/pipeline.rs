//! Derived-view computation: filter, sort, paginate.
//!
//! [`derive_view`] is the pure function behind every list screen. Given the
//! canonical items plus the current membership, sort, and page state, it
//! produces exactly the sequence to render. It has no side effects and returns
//! identical output for identical input; screens call it on demand instead of
//! being pushed notifications.
//!
//! # Pipeline
//!
//! 1. **Filter**: when a membership set is supplied, retain only members.
//! 2. **Refine**: when a local query is supplied, keep items whose display
//!    name fuzzy-matches every whitespace-separated token.
//! 3. **Sort**: by [`SortOption`]; all comparisons are stable, so ties keep
//!    their prior order.
//! 4. **Paginate**: fixed page size of 20. Remote paging trusts the
//!    provider-reported total (the items already are one page); local paging
//!    slices the in-memory collection.
//!
//! An empty result yields `page_count == 0` and an empty page: the explicit
//! empty state, distinct from a store that is still loading.

use crate::app::modes::SortOption;
use crate::domain::{CatalogItem, ItemId};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use std::cmp::Ordering;
use std::collections::HashSet;

/// Items per page on every list screen.
pub const PAGE_SIZE: usize = 20;

/// Number of pages needed for `total` items.
///
/// Zero items means zero pages; the screens render that as the explicit empty
/// state rather than a single blank page.
#[must_use]
pub const fn page_count(total: usize) -> usize {
    if total == 0 {
        0
    } else {
        (total - 1) / PAGE_SIZE + 1
    }
}

/// How the pipeline determines page boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Paging {
    /// The provider already sliced the page; `total_count` is its reported
    /// full result count and the items pass through whole.
    Remote { total_count: usize },

    /// The items are the complete collection; the pipeline slices the
    /// requested page itself and counts pages from the filtered length.
    Local,
}

/// Inputs to one derived-view computation.
#[derive(Clone, Copy)]
pub struct ViewQuery<'a> {
    pub sort: SortOption,

    /// Requested 1-based page.
    pub page: usize,

    pub paging: Paging,

    /// Retain only these ids, when present (the "registered" filter mode).
    pub members: Option<&'a HashSet<ItemId>>,

    /// Local fuzzy refinement over display names, when present.
    pub refine: Option<&'a str>,
}

impl<'a> ViewQuery<'a> {
    /// A plain unfiltered view of a locally held collection.
    #[must_use]
    pub fn local(sort: SortOption, page: usize) -> Self {
        Self {
            sort,
            page,
            paging: Paging::Local,
            members: None,
            refine: None,
        }
    }

    /// A view over one provider page with the given full result count.
    #[must_use]
    pub fn remote(sort: SortOption, page: usize, total_count: usize) -> Self {
        Self {
            sort,
            page,
            paging: Paging::Remote { total_count },
            members: None,
            refine: None,
        }
    }

    #[must_use]
    pub fn with_members(mut self, members: &'a HashSet<ItemId>) -> Self {
        self.members = Some(members);
        self
    }

    #[must_use]
    pub fn with_refine(mut self, refine: &'a str) -> Self {
        self.refine = Some(refine);
        self
    }
}

/// The filtered, sorted, paginated slice a screen actually renders.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedView<T> {
    /// The page of items, in final render order.
    pub items: Vec<T>,

    /// Total pages for the (filtered) result set; 0 when there are none.
    pub page_count: usize,

    /// The page that was requested.
    pub current_page: usize,
}

impl<T> DerivedView<T> {
    /// Whether this view is the explicit empty state.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.page_count == 0
    }
}

/// Computes the derived view for one screen.
#[must_use]
pub fn derive_view<T: CatalogItem + Clone>(items: &[T], query: &ViewQuery<'_>) -> DerivedView<T> {
    let _span = tracing::debug_span!(
        "derive_view",
        total_items = items.len(),
        sort = ?query.sort,
        page = query.page,
    )
    .entered();

    let mut selected: Vec<&T> = items
        .iter()
        .filter(|item| {
            query
                .members
                .map_or(true, |members| members.contains(&item.item_id()))
        })
        .collect();

    if let Some(refine) = query.refine.filter(|q| !q.trim().is_empty()) {
        let tokens: Vec<String> = refine.split_whitespace().map(str::to_lowercase).collect();
        let matcher = SkimMatcherV2::default();
        selected.retain(|item| {
            let name_lower = item.display_name().to_lowercase();
            tokens
                .iter()
                .all(|token| matcher.fuzzy_match(&name_lower, token).is_some())
        });
    }

    sort_items(&mut selected, query.sort);

    let (page_items, pages) = match query.paging {
        Paging::Remote { total_count } => {
            let page_items: Vec<T> = selected.into_iter().cloned().collect();
            (page_items, page_count(total_count))
        }
        Paging::Local => {
            let pages = page_count(selected.len());
            let start = query.page.saturating_sub(1).saturating_mul(PAGE_SIZE);
            let page_items: Vec<T> = selected
                .into_iter()
                .skip(start)
                .take(PAGE_SIZE)
                .cloned()
                .collect();
            (page_items, pages)
        }
    };

    tracing::debug!(
        rendered = page_items.len(),
        page_count = pages,
        "derived view computed"
    );

    DerivedView {
        items: page_items,
        page_count: pages,
        current_page: query.page,
    }
}

/// Applies the sort option in place. `Vec::sort_by` is stable, which is what
/// keeps ties in fetch order.
fn sort_items<T: CatalogItem>(items: &mut [&T], sort: SortOption) {
    match sort {
        SortOption::None => {}
        SortOption::Name => {
            items.sort_by(|a, b| {
                a.display_name()
                    .to_lowercase()
                    .cmp(&b.display_name().to_lowercase())
            });
        }
        SortOption::Rating => {
            items.sort_by(|a, b| {
                b.rating()
                    .partial_cmp(&a.rating())
                    .unwrap_or(Ordering::Equal)
            });
        }
        SortOption::Released => {
            // Undated items sort after every dated one, keeping their
            // relative fetch order among themselves.
            items.sort_by(|a, b| match (a.release_date(), b.release_date()) {
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Greater,
                (Some(_), None) => Ordering::Less,
                (Some(da), Some(db)) => db.cmp(&da),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Game;

    fn game(id: i64, name: &str, rating: Option<f64>, released: Option<&str>) -> Game {
        let mut g = Game::new(id, name);
        g.rating = rating;
        g.released = released.map(str::to_string);
        g
    }

    fn names(view: &DerivedView<Game>) -> Vec<&str> {
        view.items.iter().map(|g| g.name.as_str()).collect()
    }

    #[test]
    fn name_sort_is_lexicographic_ascending() {
        let items = vec![
            game(1, "Zelda", Some(9.0), None),
            game(2, "Arc", Some(7.0), None),
        ];
        let view = derive_view(&items, &ViewQuery::local(SortOption::Name, 1));
        assert_eq!(names(&view), vec!["Arc", "Zelda"]);
    }

    #[test]
    fn rating_sort_is_non_increasing_and_stable() {
        let items = vec![
            game(1, "a", Some(4.0), None),
            game(2, "b", Some(8.0), None),
            game(3, "c", Some(8.0), None),
            game(4, "d", None, None),
            game(5, "e", Some(6.0), None),
        ];
        let view = derive_view(&items, &ViewQuery::local(SortOption::Rating, 1));

        // Non-increasing, with the tie (b, c) in input order and the
        // unrated item last.
        assert_eq!(names(&view), vec!["b", "c", "e", "a", "d"]);
    }

    #[test]
    fn released_sort_puts_undated_items_last_in_fetch_order() {
        let items = vec![
            game(1, "undated-first", Some(1.0), None),
            game(2, "old", None, Some("2001-03-22")),
            game(3, "undated-second", None, Some("not a date")),
            game(4, "new", None, Some("2020-12-10")),
        ];
        let view = derive_view(&items, &ViewQuery::local(SortOption::Released, 1));
        assert_eq!(
            names(&view),
            vec!["new", "old", "undated-first", "undated-second"]
        );
    }

    #[test]
    fn none_sort_preserves_fetch_order() {
        let items = vec![
            game(3, "c", Some(1.0), None),
            game(1, "a", Some(9.0), None),
            game(2, "b", Some(5.0), None),
        ];
        let view = derive_view(&items, &ViewQuery::local(SortOption::None, 1));
        assert_eq!(names(&view), vec!["c", "a", "b"]);
    }

    #[test]
    fn membership_filter_retains_only_members() {
        let items = vec![
            game(1, "kept", None, None),
            game(2, "dropped", None, None),
            game(3, "kept too", None, None),
        ];
        let members: HashSet<ItemId> = [ItemId(1), ItemId(3)].into_iter().collect();

        let view = derive_view(
            &items,
            &ViewQuery::local(SortOption::None, 1).with_members(&members),
        );
        assert_eq!(names(&view), vec!["kept", "kept too"]);
        assert_eq!(view.page_count, 1);
    }

    #[test]
    fn refine_matches_every_token() {
        let items = vec![
            game(1, "The Witcher 3", None, None),
            game(2, "The Walking Dead", None, None),
            game(3, "Witch It", None, None),
        ];
        let view = derive_view(
            &items,
            &ViewQuery::local(SortOption::None, 1).with_refine("witch the"),
        );
        assert_eq!(names(&view), vec!["The Witcher 3"]);
    }

    #[test]
    fn local_paging_slices_the_requested_page() {
        let items: Vec<Game> = (1..=45)
            .map(|n| game(n, &format!("g{n:02}"), None, None))
            .collect();

        let view = derive_view(&items, &ViewQuery::local(SortOption::None, 3));
        assert_eq!(view.page_count, 3);
        assert_eq!(view.items.len(), 5);
        assert_eq!(view.items[0].name, "g41");
    }

    #[test]
    fn remote_paging_passes_items_through_with_reported_total() {
        let items: Vec<Game> = (1..=20)
            .map(|n| game(n, &format!("g{n}"), None, None))
            .collect();

        let view = derive_view(&items, &ViewQuery::remote(SortOption::None, 2, 45));
        assert_eq!(view.page_count, 3);
        assert_eq!(view.items.len(), 20);
        assert_eq!(view.current_page, 2);
    }

    #[test]
    fn empty_results_are_the_explicit_empty_state() {
        let items: Vec<Game> = vec![game(1, "only", None, None)];
        let members: HashSet<ItemId> = HashSet::new();

        let view = derive_view(
            &items,
            &ViewQuery::local(SortOption::None, 1).with_members(&members),
        );
        assert!(view.is_empty());
        assert_eq!(view.page_count, 0);
        assert!(view.items.is_empty());
    }

    #[test]
    fn identical_input_yields_identical_output() {
        let items = vec![
            game(1, "b", Some(2.0), Some("2010-01-01")),
            game(2, "a", Some(3.0), None),
        ];
        let query = ViewQuery::local(SortOption::Rating, 1);
        assert_eq!(derive_view(&items, &query), derive_view(&items, &query));
    }

    #[test]
    fn page_count_arithmetic() {
        assert_eq!(page_count(0), 0);
        assert_eq!(page_count(1), 1);
        assert_eq!(page_count(20), 1);
        assert_eq!(page_count(21), 2);
        assert_eq!(page_count(45), 3);
    }
}
