//! Write-through bookmark set.
//!
//! The set is read from the store once when opened and written back in full
//! on every toggle. A toggle whose write fails is rolled back, so the
//! in-memory set always equals the last payload the store accepted.

use std::cmp::Reverse;
use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::error::RepomarkError;
use crate::models::RepositorySummary;
use crate::traits::KeyValueStore;

/// Store key holding the persisted bookmark payload
pub const BOOKMARKS_KEY: &str = "bookmarks";

#[derive(Error, Debug)]
pub enum BookmarkError {
    #[error("Failed to encode bookmarks: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Failed to persist bookmarks: {0}")]
    Persist(#[source] RepomarkError),
}

/// Membership change performed by [`BookmarkStore::toggle`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Added,
    Removed,
}

impl Toggle {
    /// Whether the repository is bookmarked after the toggle
    pub fn is_bookmarked(self) -> bool {
        matches!(self, Toggle::Added)
    }
}

/// Built-in orderings for [`BookmarkStore::list`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BookmarkOrder {
    /// Most starred first
    #[default]
    StarsDescending,
    /// Case-insensitive by repository name
    Name,
    /// Order in which bookmarks were added
    Added,
}

#[derive(Debug, Clone)]
struct Entry {
    order: u64,
    repo: RepositorySummary,
}

/// One persisted bookmark: the snapshot plus its insertion position
#[derive(Serialize, Deserialize)]
struct StoredBookmark<R> {
    /// Payloads written without positions load as 0
    #[serde(default)]
    added: u64,
    #[serde(flatten)]
    repo: R,
}

type Payload = BTreeMap<u64, StoredBookmark<RepositorySummary>>;

pub struct BookmarkStore {
    store: Box<dyn KeyValueStore>,
    entries: HashMap<u64, Entry>,
    next_order: u64,
    /// Id and position of the latest removal; re-adding it restores the position
    last_removed: Option<(u64, u64)>,
}

impl BookmarkStore {
    /// Load bookmarks from `store`
    ///
    /// An absent, unreadable or malformed payload yields an empty set.
    pub fn open(store: Box<dyn KeyValueStore>) -> Self {
        let stored = match store.get(BOOKMARKS_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Payload>(&raw) {
                Ok(map) => map.into_values().collect(),
                Err(e) => {
                    warn!(error = %e, "Persisted bookmarks are corrupt, starting empty");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(error = %e, "Could not read persisted bookmarks, starting empty");
                Vec::new()
            }
        };

        let mut bookmarks = Self {
            store,
            entries: HashMap::new(),
            next_order: 0,
            last_removed: None,
        };
        for StoredBookmark { added, repo } in stored {
            // Identity is the snapshot's own id, whatever key it was stored under
            if bookmarks.entries.contains_key(&repo.id) {
                continue;
            }
            bookmarks.next_order = bookmarks.next_order.max(added.saturating_add(1));
            bookmarks.entries.insert(repo.id, Entry { order: added, repo });
        }
        debug!(count = bookmarks.len(), "Loaded bookmarks");
        bookmarks
    }

    /// Add `repo` if it is not bookmarked, remove it otherwise, then persist
    ///
    /// On error nothing changed, neither in memory nor in the store.
    pub fn toggle(&mut self, repo: &RepositorySummary) -> Result<Toggle, BookmarkError> {
        if let Some(removed) = self.entries.remove(&repo.id) {
            let order = removed.order;
            if let Err(e) = self.persist() {
                self.entries.insert(repo.id, removed);
                return Err(e);
            }
            self.last_removed = Some((repo.id, order));
            debug!(id = repo.id, "Removed bookmark");
            return Ok(Toggle::Removed);
        }

        let next_order = self.next_order;
        let order = match self.last_removed {
            Some((id, order)) if id == repo.id => order,
            _ => {
                self.next_order += 1;
                next_order
            }
        };
        self.entries.insert(
            repo.id,
            Entry {
                order,
                repo: repo.clone(),
            },
        );
        if let Err(e) = self.persist() {
            self.entries.remove(&repo.id);
            self.next_order = next_order;
            return Err(e);
        }
        self.last_removed = None;
        debug!(id = repo.id, order, "Added bookmark");
        Ok(Toggle::Added)
    }

    fn persist(&mut self) -> Result<(), BookmarkError> {
        let payload = self.payload()?;
        self.store
            .set(BOOKMARKS_KEY, &payload)
            .map_err(BookmarkError::Persist)
    }

    /// Serialized form of the current set, keyed by id in ascending order
    pub fn payload(&self) -> Result<String, serde_json::Error> {
        let by_id: BTreeMap<u64, StoredBookmark<&RepositorySummary>> = self
            .entries
            .values()
            .map(|entry| {
                let stored = StoredBookmark {
                    added: entry.order,
                    repo: &entry.repo,
                };
                (entry.repo.id, stored)
            })
            .collect();
        serde_json::to_string_pretty(&by_id)
    }

    pub fn is_bookmarked(&self, id: u64) -> bool {
        self.entries.contains_key(&id)
    }

    /// Snapshot stored for `id`
    pub fn get(&self, id: u64) -> Option<&RepositorySummary> {
        self.entries.get(&id).map(|entry| &entry.repo)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn list(&self, order: BookmarkOrder) -> Vec<RepositorySummary> {
        match order {
            BookmarkOrder::StarsDescending => self.list_by(|repo| Reverse(repo.star_count)),
            BookmarkOrder::Name => self.list_by(|repo| repo.name.to_lowercase()),
            BookmarkOrder::Added => self.list_by(|_| ()),
        }
    }

    /// Snapshots ordered by a caller-supplied key, ties in insertion order
    pub fn list_by<K, F>(&self, key: F) -> Vec<RepositorySummary>
    where
        K: Ord,
        F: Fn(&RepositorySummary) -> K,
    {
        let mut entries: Vec<&Entry> = self.entries.values().collect();
        // Payloads without positions share order 0; id keeps those deterministic
        entries.sort_by_key(|entry| (entry.order, entry.repo.id));
        // Stable sort keeps insertion order among equal keys
        entries.sort_by_key(|entry| key(&entry.repo));
        entries.into_iter().map(|entry| entry.repo.clone()).collect()
    }
}
