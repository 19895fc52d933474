//! Track metadata enrichment
//!
//! Metadata lookups are asynchronous and best-effort. Callers are expected to
//! fall back to [`TrackDetails::unknown`] on failure rather than block playback.
//! Results are kept in a [`MetadataCache`] keyed by track id, which can be
//! exported and re-imported as JSON.

use crate::error::{CoreError, Result};
use crate::types::{Track, TrackDetails, TrackId};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

/// Asynchronous provider of display metadata
#[async_trait(?Send)]
pub trait MetadataProvider {
    /// Look up display details for a track
    async fn details(&self, track: &Track) -> Result<TrackDetails>;
}

/// Provider that reads details off the track itself
///
/// Title and artist were already parsed from the catalog entry name; the
/// duration stays unknown until the sink reports it.
#[derive(Debug, Clone, Copy, Default)]
pub struct NameParsingMetadata;

#[async_trait(?Send)]
impl MetadataProvider for NameParsingMetadata {
    async fn details(&self, track: &Track) -> Result<TrackDetails> {
        Ok(TrackDetails::of(track))
    }
}

/// Details already looked up, keyed by track id
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetadataCache {
    entries: BTreeMap<TrackId, TrackDetails>,
}

impl MetadataCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Store details for a track, returning the previous entry
    pub fn set(&mut self, id: TrackId, details: TrackDetails) -> Option<TrackDetails> {
        self.entries.insert(id, details)
    }

    /// Cached details for a track
    pub fn get(&self, id: &TrackId) -> Option<&TrackDetails> {
        self.entries.get(id)
    }

    /// Whether details are cached for a track
    pub fn contains(&self, id: &TrackId) -> bool {
        self.entries.contains_key(id)
    }

    /// All cached entries, ordered by id
    pub fn all(&self) -> &BTreeMap<TrackId, TrackDetails> {
        &self.entries
    }

    /// Number of cached entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every cached entry
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Export as a pretty-printed JSON object of id to details
    pub fn export_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Merge entries from a JSON object of id to details
    ///
    /// Imported entries replace cached ones with the same id. Like the
    /// catalog import this is all-or-nothing. Returns the number merged.
    pub fn import_json(&mut self, json: &str) -> Result<usize> {
        let value = serde_json::from_str::<Value>(json)?;
        if !value.is_object() {
            return Err(CoreError::MetadataNotObject);
        }

        let imported: BTreeMap<TrackId, TrackDetails> = serde_json::from_value(value)?;
        let count = imported.len();
        self.entries.extend(imported);

        debug!("Imported {} metadata entries", count);
        Ok(count)
    }
}
