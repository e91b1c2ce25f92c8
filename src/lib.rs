//! Playdex: a client-side catalog browser core for video games, publishers,
//! and community events.
//!
//! Playdex is the headless state layer of a catalog browser. It provides:
//! - Paginated, searchable list state for games, publishers, and events
//! - Favorites and event registrations persisted locally as ledgers
//! - A pure derived-view pipeline (filter → sort → paginate) for rendering
//! - Last-issued-wins resolution of out-of-order fetch completions
//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Host (rendering, executor, routing)                │  ← Not this crate
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling                                   │
//! │  - Action dispatching                               │
//! │  - List stores & ledger composition                 │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ View Layer    │   │ Storage Layer │   │ Provider Layer│
//! │ (view/)       │   │ (storage/)    │   │ (provider/)   │
//! │ - Filter      │   │ - Ledgers     │   │ - Fetch trait │
//! │ - Sort        │   │ - JSON blobs  │   │ - Req/resp    │
//! │ - Paginate    │   │ - Versioning  │   │ - Sample data │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Data directory (infrastructure/)                 │
//! │  - Item models, errors (domain/)                    │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Control flow
//!
//! The presentation layer translates user interactions into [`Event`]s and
//! calls [`handle_event`]; the handler mutates [`AppState`] and returns the
//! fetches to run as [`Action`]s. The host executes each fetch (typically
//! through [`ProviderBridge`](provider::ProviderBridge) on its own executor)
//! and feeds completions back as [`Event::Provider`]. Screens read their
//! render state through the pull-based `*_view()` accessors on `AppState`;
//! there are no push notifications.
//!
//! Everything is single-threaded and event-driven. Out-of-order completions
//! are handled by request tokens: only the latest-issued fetch per store is
//! ever applied, which is the concurrency model spelled out on
//! [`ListStore`](app::state::ListStore).
//!
//! # Example
//!
//! ```rust
//! use playdex::storage::{Ledger, MemoryStore};
//! use playdex::{handle_event, AppState, Event};
//!
//! let mut state = AppState::new(
//!     Ledger::load("favorites", Box::new(MemoryStore::new())),
//!     Ledger::load("registered_events", Box::new(MemoryStore::new())),
//! );
//!
//! let (render, actions) = handle_event(&mut state, &Event::LoadEvents)?;
//! assert!(render);
//! assert_eq!(actions.len(), 1); // the events fetch to execute
//! # Ok::<(), playdex::CatalogError>(())
//! ```
//!
//! With durable ledgers and the bundled sample provider:
//!
//! ```no_run
//! use playdex::provider::{ProviderBridge, SampleCatalog};
//! use playdex::{handle_event, initialize, Action, Config, Event};
//!
//! let config = Config::default();
//! playdex::observability::init_tracing(&config);
//!
//! let mut state = initialize(&config);
//! let mut bridge = ProviderBridge::new(Box::new(SampleCatalog::new()));
//!
//! let (_, actions) = handle_event(&mut state, &Event::LoadEvents)?;
//! for Action::Dispatch(request) in actions {
//!     let response = bridge.handle_request(request);
//!     handle_event(&mut state, &Event::Provider(response))?;
//! }
//!
//! let view = state.events_view();
//! assert_eq!(view.items.len(), 5);
//! # Ok::<(), playdex::CatalogError>(())
//! ```

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod provider;
pub mod storage;
pub mod view;

pub use app::{handle_event, Action, AppState, Event, EventFilter, LoadPhase, SortOption};
pub use domain::{CatalogError, Game, GameEvent, ItemId, Publisher, Result};
pub use view::{DerivedView, PAGE_SIZE};

use crate::storage::{BlobStore, JsonFileStore, Ledger, MemoryStore};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Storage key of the favorites ledger.
const FAVORITES_KEY: &str = "favorites";

/// Storage key of the event-registration ledger.
const REGISTRATIONS_KEY: &str = "registered_events";

/// Host configuration.
///
/// Every field is optional with a sensible default, so an empty file (or no
/// file at all) is a valid configuration.
///
/// # Example
///
/// ```toml
/// # playdex.toml
/// data_dir = "/home/user/.local/share/playdex"
/// trace_level = "debug"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Directory for ledger files. Defaults to the platform data directory
    /// (overridable via `PLAYDEX_DATA_DIR`).
    pub data_dir: Option<PathBuf>,

    /// Tracing filter, e.g. `info` or `playdex=debug`. `RUST_LOG` wins over
    /// this when set. Default: `info`.
    pub trace_level: Option<String>,
}

impl Config {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML for
    /// this structure.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        toml::from_str(&raw).map_err(|e| {
            CatalogError::Config(format!("failed to parse {}: {e}", path.display()))
        })
    }
}

/// Builds the application state with durable ledgers.
///
/// Resolves the data directory, loads both ledgers from it, and returns a
/// ready [`AppState`] with empty, idle list stores. If the ledger directory
/// cannot be created, the ledgers degrade to in-memory storage and the
/// failure is logged; startup never fails on persistence problems.
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    let dir = infrastructure::data_dir(config.data_dir.as_ref());
    tracing::debug!(data_dir = ?dir, "initializing catalog browser state");

    AppState::new(
        Ledger::load(FAVORITES_KEY, open_store(&dir)),
        Ledger::load(REGISTRATIONS_KEY, open_store(&dir)),
    )
}

/// Opens the JSON blob store, falling back to memory when the directory is
/// unusable.
fn open_store(dir: &Path) -> Box<dyn BlobStore> {
    match JsonFileStore::new(dir.to_path_buf()) {
        Ok(store) => Box::new(store),
        Err(e) => {
            tracing::warn!(error = %e, "ledger storage unavailable, running in memory only");
            Box::new(MemoryStore::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_file_parses_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("playdex.toml");
        std::fs::write(&path, "").unwrap();

        let config = Config::from_file(&path).unwrap();
        assert!(config.data_dir.is_none());
        assert!(config.trace_level.is_none());
    }

    #[test]
    fn config_file_fields_are_applied() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("playdex.toml");
        std::fs::write(&path, "data_dir = \"/tmp/pd\"\ntrace_level = \"debug\"\n").unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.data_dir.as_deref(), Some(Path::new("/tmp/pd")));
        assert_eq!(config.trace_level.as_deref(), Some("debug"));
    }

    #[test]
    fn invalid_config_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("playdex.toml");
        std::fs::write(&path, "data_dir = 3").unwrap();

        match Config::from_file(&path) {
            Err(CatalogError::Config(message)) => assert!(message.contains("playdex.toml")),
            other => panic!("expected config error, got {other:?}"),
        }
    }

    #[test]
    fn initialize_uses_the_configured_directory() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            data_dir: Some(dir.path().to_path_buf()),
            trace_level: None,
        };

        let mut state = initialize(&config);
        state.favorites.toggle(Game::new(1, "Persisted"));

        assert!(dir.path().join("favorites.json").exists());
    }
}
