//! Membership ledgers: favorites and event registrations.
//!
//! A [`Ledger`] is an insertion-ordered, duplicate-free set of catalog items
//! layered on a [`BlobStore`]. The favorites ledger stores full [`Game`]
//! snapshots so the favorites screen renders without re-fetching; the
//! registration ledger stores bare ids. Both persist the whole ledger
//! synchronously after every mutation and load exactly once at startup.
//!
//! Persistence failures never propagate: a ledger whose store stops working
//! keeps serving membership from memory and logs the write failures.

use crate::domain::{Game, ItemId};
use crate::storage::backend::BlobStore;
use crate::storage::models::LedgerData;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashSet;

/// A record type a ledger can hold.
///
/// The id is the membership key; the rest of the record is whatever snapshot
/// the screen needs to render the member.
pub trait LedgerRecord: Serialize + DeserializeOwned + Clone {
    /// Identity used for membership checks and deduplication.
    fn record_id(&self) -> ItemId;
}

/// Registrations persist bare ids.
impl LedgerRecord for ItemId {
    fn record_id(&self) -> ItemId {
        *self
    }
}

/// Favorites persist the full game snapshot taken at toggle time.
///
/// The snapshot is intentionally not refreshed when the canonical item changes
/// upstream; the favorites screen shows the item as it was when favorited.
impl LedgerRecord for Game {
    fn record_id(&self) -> ItemId {
        self.id
    }
}

/// An insertion-ordered membership set persisted as a whole on every mutation.
///
/// Invariants: no duplicate ids; `toggle` is an involution per id; the
/// in-memory index and entry list always agree.
pub struct Ledger<R: LedgerRecord> {
    /// Storage key, e.g. `"favorites"` or `"registered_events"`.
    key: String,

    /// Members in insertion order. This is what gets persisted.
    entries: Vec<R>,

    /// Id index for O(1) membership checks.
    index: HashSet<ItemId>,

    /// Persistence backend. Never read after construction, only written.
    store: Box<dyn BlobStore>,
}

impl<R: LedgerRecord> Ledger<R> {
    /// Loads a ledger from storage, or starts empty.
    ///
    /// Absent, corrupt, or version-mismatched payloads all produce an empty
    /// ledger; so does a failing read, after a warning. Startup never fails on
    /// persisted state.
    pub fn load(key: impl Into<String>, store: Box<dyn BlobStore>) -> Self {
        let key = key.into();

        let entries = match store.read(&key) {
            Ok(Some(payload)) => LedgerData::<R>::decode(&payload).entries,
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "ledger read failed, starting empty");
                Vec::new()
            }
        };

        // Drop any duplicate ids a hand-edited file may have introduced.
        let mut index = HashSet::with_capacity(entries.len());
        let entries: Vec<R> = entries
            .into_iter()
            .filter(|record| index.insert(record.record_id()))
            .collect();

        tracing::debug!(key = %key, members = entries.len(), "ledger loaded");

        Self {
            key,
            entries,
            index,
            store,
        }
    }

    /// Toggles membership for `record`'s id and persists the result.
    ///
    /// Absent ids are inserted (storing the given record as the snapshot);
    /// present ids are removed, regardless of how the stored snapshot compares
    /// to `record`. Returns the new membership state. The ledger is persisted
    /// before this returns; a persistence failure is logged and the in-memory
    /// state stands.
    pub fn toggle(&mut self, record: R) -> bool {
        let id = record.record_id();

        let member = if self.index.remove(&id) {
            self.entries.retain(|existing| existing.record_id() != id);
            tracing::debug!(key = %self.key, id = %id, "ledger member removed");
            false
        } else {
            self.index.insert(id);
            self.entries.push(record);
            tracing::debug!(key = %self.key, id = %id, "ledger member added");
            true
        };

        self.persist();
        member
    }

    /// Returns whether `id` is currently a member.
    ///
    /// O(1) against the in-memory index; storage is not consulted.
    #[must_use]
    pub fn is_member(&self, id: ItemId) -> bool {
        self.index.contains(&id)
    }

    /// Current members in insertion order.
    #[must_use]
    pub fn list(&self) -> &[R] {
        &self.entries
    }

    /// Id set backing the derived-view membership filter.
    #[must_use]
    pub fn id_set(&self) -> &HashSet<ItemId> {
        &self.index
    }

    /// Number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the ledger has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes every member and persists the empty ledger.
    pub fn clear(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        self.entries.clear();
        self.index.clear();
        tracing::debug!(key = %self.key, "ledger cleared");
        self.persist();
    }

    /// Writes the whole ledger to the backend.
    ///
    /// Serialization of in-memory records cannot fail in practice; a backend
    /// write failure is logged and swallowed so the caller keeps a working
    /// in-memory ledger.
    fn persist(&mut self) {
        let data = LedgerData::current(self.entries.clone());
        let payload = match serde_json::to_string(&data) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "ledger serialization failed");
                return;
            }
        };

        if let Err(e) = self.store.write(&self.key, &payload) {
            tracing::warn!(key = %self.key, error = %e, "ledger persist failed, continuing in memory");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::json::{JsonFileStore, MemoryStore};

    fn memory_ledger() -> Ledger<ItemId> {
        Ledger::load("registered_events", Box::new(MemoryStore::new()))
    }

    #[test]
    fn toggle_is_an_involution() {
        let mut ledger = memory_ledger();
        let id = ItemId(5);

        assert!(!ledger.is_member(id));
        for round in 0..4 {
            let member = ledger.toggle(id);
            // Odd number of toggles so far => member.
            assert_eq!(member, round % 2 == 0);
            assert_eq!(ledger.is_member(id), member);
        }
        assert!(!ledger.is_member(id));
    }

    #[test]
    fn list_preserves_insertion_order() {
        let mut ledger = memory_ledger();
        ledger.toggle(ItemId(3));
        ledger.toggle(ItemId(1));
        ledger.toggle(ItemId(2));
        ledger.toggle(ItemId(1)); // remove

        assert_eq!(ledger.list(), &[ItemId(3), ItemId(2)]);
    }

    #[test]
    fn snapshot_persists_and_unpersists_through_the_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().to_path_buf()).unwrap();
        let mut ledger: Ledger<Game> = Ledger::load("favorites", Box::new(store));

        ledger.toggle(Game::new(5, "X"));
        assert!(ledger.is_member(ItemId(5)));

        let persisted = std::fs::read_to_string(dir.path().join("favorites.json")).unwrap();
        assert!(persisted.contains(r#""name":"X""#));

        ledger.toggle(Game::new(5, "X"));
        assert!(!ledger.is_member(ItemId(5)));

        let persisted = std::fs::read_to_string(dir.path().join("favorites.json")).unwrap();
        let data: serde_json::Value = serde_json::from_str(&persisted).unwrap();
        assert_eq!(data["entries"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn reload_restores_members_in_order() {
        let dir = tempfile::tempdir().unwrap();

        {
            let store = JsonFileStore::new(dir.path().to_path_buf()).unwrap();
            let mut ledger: Ledger<ItemId> = Ledger::load("registered_events", Box::new(store));
            ledger.toggle(ItemId(2));
            ledger.toggle(ItemId(9));
        }

        let store = JsonFileStore::new(dir.path().to_path_buf()).unwrap();
        let ledger: Ledger<ItemId> = Ledger::load("registered_events", Box::new(store));
        assert_eq!(ledger.list(), &[ItemId(2), ItemId(9)]);
    }

    #[test]
    fn corrupt_payload_loads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("favorites.json"), "{ definitely not json").unwrap();

        let store = JsonFileStore::new(dir.path().to_path_buf()).unwrap();
        let ledger: Ledger<Game> = Ledger::load("favorites", Box::new(store));
        assert!(ledger.is_empty());
    }

    #[test]
    fn duplicate_ids_in_persisted_data_are_dropped_on_load() {
        let mut seed = MemoryStore::new();
        seed.write(
            "registered_events",
            r#"{"version":1,"entries":[4,4,7]}"#,
        )
        .unwrap();

        let ledger: Ledger<ItemId> = Ledger::load("registered_events", Box::new(seed));
        assert_eq!(ledger.list(), &[ItemId(4), ItemId(7)]);
    }

    #[test]
    fn clear_empties_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().to_path_buf()).unwrap();
        let mut ledger: Ledger<ItemId> = Ledger::load("registered_events", Box::new(store));

        ledger.toggle(ItemId(1));
        ledger.clear();
        assert!(ledger.is_empty());

        let persisted =
            std::fs::read_to_string(dir.path().join("registered_events.json")).unwrap();
        let data: serde_json::Value = serde_json::from_str(&persisted).unwrap();
        assert_eq!(data["entries"].as_array().unwrap().len(), 0);
    }
}
