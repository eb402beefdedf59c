//! Recent successful predictions, newest first.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::form::PredictionRequest;
use crate::predictor::models::PredictionResult;
use crate::storage::{KeyValueStore, StorageError};

/// Storage key holding the JSON array of entries.
pub const HISTORY_KEY: &str = "predictionHistory";

pub const MAX_HISTORY_ENTRIES: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Milliseconds since the Unix epoch at creation.
    pub id: i64,
    /// ISO-8601, UTC.
    pub timestamp: String,
    pub input: PredictionRequest,
    pub prediction: f64,
}

pub struct HistoryStore<S> {
    store: S,
    entries: Vec<HistoryEntry>,
}

impl<S: KeyValueStore> HistoryStore<S> {
    /// Reads the persisted history once. Missing or unreadable history starts empty.
    pub fn load(store: S) -> Self {
        let entries = match store.get(HISTORY_KEY) {
            Ok(Some(text)) => match serde_json::from_str::<Vec<HistoryEntry>>(&text) {
                Ok(mut entries) => {
                    entries.truncate(MAX_HISTORY_ENTRIES);
                    entries
                }
                Err(e) => {
                    warn!(error = %e, "Discarding unreadable prediction history");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(error = %e, "Failed to read prediction history");
                Vec::new()
            }
        };

        debug!(count = entries.len(), "Loaded prediction history");
        Self { store, entries }
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.first()
    }

    pub fn get(&self, id: i64) -> Option<&HistoryEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Adds a prediction stamped with the current time.
    pub fn record(
        &mut self,
        result: &PredictionResult,
        input: PredictionRequest,
    ) -> Result<&HistoryEntry, StorageError> {
        self.record_at(result, input, Utc::now())
    }

    /// Adds a prediction stamped with `now`.
    ///
    /// The entry is kept in memory even when writing it out fails.
    pub fn record_at(
        &mut self,
        result: &PredictionResult,
        input: PredictionRequest,
        now: DateTime<Utc>,
    ) -> Result<&HistoryEntry, StorageError> {
        // ids stay unique when two predictions land in the same millisecond
        let mut id = now.timestamp_millis();
        if let Some(newest) = self.entries.first() {
            id = id.max(newest.id.saturating_add(1));
        }

        let entry = HistoryEntry {
            id,
            timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            input,
            prediction: result.predicted_price,
        };

        self.entries.insert(0, entry);
        self.entries.truncate(MAX_HISTORY_ENTRIES);
        info!(
            id,
            prediction = result.predicted_price,
            count = self.entries.len(),
            "Recorded prediction"
        );

        self.persist()?;
        Ok(&self.entries[0])
    }

    /// Drops every entry and removes the storage key.
    pub fn clear(&mut self) -> Result<(), StorageError> {
        self.entries.clear();
        self.store.remove(HISTORY_KEY)?;
        info!("Cleared prediction history");
        Ok(())
    }

    fn persist(&mut self) -> Result<(), StorageError> {
        let text = serde_json::to_string(&self.entries)?;
        self.store.set(HISTORY_KEY, &text)
    }
}
