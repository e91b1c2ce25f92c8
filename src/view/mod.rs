//! Derived-view layer.
//!
//! Pure computation of what each list screen renders. No state lives here;
//! [`AppState`](crate::app::AppState) exposes pull-based accessors that feed
//! its stores and ledgers through [`derive_view`].

pub mod pipeline;

pub use pipeline::{derive_view, page_count, DerivedView, Paging, ViewQuery, PAGE_SIZE};
