//! Application layer coordinating state, events, and actions.
//!
//! This module defines the core application logic layer, sitting between the
//! host (which owns rendering and the provider's executor) and the
//! domain/storage/provider layers.
//!
//! # Architecture
//!
//! The application layer follows a unidirectional data flow pattern:
//!
//! ```text
//! Screen Input → Events → Event Handler → State Mutations → Actions → Fetches
//!                   ↑                                           ↓
//!                   └──────────── Provider Responses ───────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing logic and state transition coordinator
//! - [`modes`]: Load phase, sort option, and filter state machines
//! - [`state`]: Central application state and derived-view accessors

pub mod actions;
pub mod handler;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::{EventFilter, LoadPhase, SortOption};
pub use state::{AppState, DetailStore, ListStore};
