//! History/Stats Ledger
//!
//! Owns the translation history, favorites and usage counters, and moves them in and
//! out of a `KeyValueStore`. Callers stage changes on a copy of `LedgerState` and
//! commit with [`LedgerState::save`]; a failed save restores every key it touched.

pub mod favorites;
pub mod history;
pub mod stats;
pub mod storage;

use chrono::{DateTime, Local, NaiveDate};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::StorageError;

pub use favorites::{FavoriteRecord, Favorites};
pub use history::{HISTORY_CAPACITY, HistoryRecord, Ledger, PREVIEW_CHARS, preview};
pub use stats::StatsCounters;
pub use storage::{FileStore, KeyValueStore, MemoryStore};

pub const HISTORY_KEY: &str = "translationHistory";
pub const STATS_KEY: &str = "appStats";
pub const FAVORITES_KEY: &str = "favorites";

/// Which part of the state a change touched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    History,
    Stats,
    Favorites,
}

impl Section {
    pub fn key(&self) -> &'static str {
        match self {
            Section::History => HISTORY_KEY,
            Section::Stats => STATS_KEY,
            Section::Favorites => FAVORITES_KEY,
        }
    }
}

/// Everything the ledger persists
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerState {
    pub history: Ledger,
    pub stats: StatsCounters,
    pub favorites: Favorites,
}

impl LedgerState {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            history: Ledger::new(),
            stats: StatsCounters::new(today),
            favorites: Favorites::default(),
        }
    }

    /// Load state from `store`
    ///
    /// Missing keys start from defaults. A value that no longer parses is logged and
    /// replaced by the default rather than failing the whole load.
    ///
    /// # Errors
    ///
    /// Only when the store itself cannot be read.
    pub fn load(store: &dyn KeyValueStore, today: NaiveDate) -> Result<Self, StorageError> {
        let history: Ledger = load_key(store, HISTORY_KEY)?.unwrap_or_default();
        let stats: StatsCounters = load_key(store, STATS_KEY)?.unwrap_or_else(|| StatsCounters::new(today));
        let favorites: Favorites = load_key(store, FAVORITES_KEY)?.unwrap_or_default();
        Ok(Self {
            history,
            stats,
            favorites,
        })
    }

    /// Write `sections` to `store`, all or nothing
    ///
    /// On failure every key already written is put back to its previous value (or
    /// removed if it did not exist) before the error is returned.
    pub fn save(&self, store: &dyn KeyValueStore, sections: &[Section]) -> Result<(), StorageError> {
        let mut written: Vec<(&str, Option<String>)> = Vec::new();

        for section in sections {
            let key = section.key();
            let result = self
                .serialize(*section)
                .and_then(|value| {
                    let previous = store.get(key)?;
                    store.set(key, &value)?;
                    Ok(previous)
                });

            match result {
                Ok(previous) => written.push((key, previous)),
                Err(e) => {
                    tracing::warn!(key, error = %e, "ledger save failed, rolling back");
                    rollback(store, &written);
                    return Err(e);
                }
            }
        }
        Ok(())
    }

    /// Next record id: the current time in milliseconds, bumped past any id in use
    pub fn next_id(&self, now: DateTime<Local>) -> u64 {
        let millis = u64::try_from(now.timestamp_millis()).unwrap_or(0);
        let last = self
            .history
            .last_id()
            .into_iter()
            .chain(self.favorites.last_id())
            .max();
        match last {
            Some(last) if last >= millis => last + 1,
            _ => millis,
        }
    }

    fn serialize(&self, section: Section) -> Result<String, StorageError> {
        let value = match section {
            Section::History => serde_json::to_string(&self.history),
            Section::Stats => serde_json::to_string(&self.stats),
            Section::Favorites => serde_json::to_string(&self.favorites),
        };
        value.map_err(|e| StorageError::Serialize(e.to_string()))
    }
}

fn load_key<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Result<Option<T>, StorageError> {
    let Some(raw) = store.get(key)? else {
        return Ok(None);
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            tracing::warn!(key, error = %e, "discarding unreadable stored value");
            Ok(None)
        }
    }
}

fn rollback(store: &dyn KeyValueStore, written: &[(&str, Option<String>)]) {
    for (key, previous) in written.iter().rev() {
        let restored = match previous {
            Some(value) => store.set(key, value),
            None => store.remove(key),
        };
        if let Err(e) = restored {
            tracing::error!(key, error = %e, "failed to restore stored value");
        }
    }
}

/// Serialize helper used by callers that export state (e.g. `--json` output)
pub fn to_json<T: Serialize>(value: &T) -> Result<String, StorageError> {
    serde_json::to_string_pretty(value).map_err(|e| StorageError::Serialize(e.to_string()))
}
