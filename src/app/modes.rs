//! List-screen mode types.
//!
//! This module defines the small state machines that shape what a list screen
//! shows: the per-store load phase, the sort options, and the events filter.
//!
//! # Load Phase
//!
//! Every fetch-backed store moves `Idle → Loading → {Ready, Failed}`; the next
//! load re-enters `Loading` from either terminal state. Because the phase is
//! one enum, "loading" and "failed with a message" are mutually exclusive by
//! construction and no partial ready-with-stale-error state is observable.

/// Load phase of a fetch-backed store.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadPhase {
    /// No fetch has been issued yet.
    #[default]
    Idle,

    /// A fetch is in flight. Previously resolved items stay visible.
    Loading,

    /// The latest-issued fetch resolved successfully.
    Ready,

    /// The latest-issued fetch failed; carries the user-visible message.
    /// Items from the last successful fetch are untouched.
    Failed(String),
}

impl LoadPhase {
    /// Whether a fetch is currently in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// The failure message, if the store is in the failed state.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Sort options offered on the games and favorites screens.
///
/// `None` keeps fetch order. The other options are applied by the derived-view
/// pipeline with stable comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOption {
    /// Fetch order, the screen default.
    #[default]
    None,

    /// Display name, ascending.
    Name,

    /// Rating, descending; unrated items last.
    Rating,

    /// Release date, descending; undated items last.
    Released,
}

impl SortOption {
    /// Parses the screen's select-control value.
    ///
    /// Unknown values fall back to fetch order rather than erroring; a stale
    /// bookmark must not break the screen.
    #[must_use]
    pub fn from_param(raw: &str) -> Self {
        match raw {
            "name" => Self::Name,
            "rating" => Self::Rating,
            "released" => Self::Released,
            _ => Self::None,
        }
    }
}

/// Base filter on the events screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventFilter {
    /// Every fetched event.
    #[default]
    All,

    /// Only events the user registered for.
    Registered,
}

impl EventFilter {
    /// Interprets the `filter` navigational query parameter at screen entry.
    ///
    /// `filter=registered` selects the registered view; anything else,
    /// including an absent parameter, is the default view.
    #[must_use]
    pub fn from_query(param: Option<&str>) -> Self {
        match param {
            Some("registered") => Self::Registered,
            _ => Self::All,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_param_parsing_falls_back_to_fetch_order() {
        assert_eq!(SortOption::from_param("name"), SortOption::Name);
        assert_eq!(SortOption::from_param("rating"), SortOption::Rating);
        assert_eq!(SortOption::from_param("released"), SortOption::Released);
        assert_eq!(SortOption::from_param("none"), SortOption::None);
        assert_eq!(SortOption::from_param("banana"), SortOption::None);
    }

    #[test]
    fn event_filter_reads_the_query_parameter() {
        assert_eq!(
            EventFilter::from_query(Some("registered")),
            EventFilter::Registered
        );
        assert_eq!(EventFilter::from_query(Some("all")), EventFilter::All);
        assert_eq!(EventFilter::from_query(None), EventFilter::All);
    }
}
