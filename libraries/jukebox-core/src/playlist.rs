//! Playlist source and the default music catalog
//!
//! The widget never reaches for a process-wide playlist: a `PlaylistSource`
//! is handed to it at construction. `MusicCatalog` is the stock source, an
//! ordered mapping of entry names to media urls.

use crate::error::{CoreError, Result};
use crate::types::Track;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;
use tracing::debug;

/// Supplies the ordered list of tracks for a session
pub trait PlaylistSource {
    /// Ordered tracks; the list is treated as immutable for the session
    fn tracks(&self) -> Vec<Track>;
}

impl PlaylistSource for Vec<Track> {
    fn tracks(&self) -> Vec<Track> {
        self.clone()
    }
}

/// A named media url in the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Entry name, conventionally `"Artist - Title"`
    pub name: String,

    /// Media url
    pub url: String,
}

/// Ordered name to url catalog
///
/// Insertion order is preserved; re-adding an existing name replaces its url
/// in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MusicCatalog {
    entries: Vec<CatalogEntry>,
}

impl MusicCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog shipped with the club site
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        catalog.add(
            "Stal",
            "https://m701.music.126.net/20250905061623/56b08bf6628076c0f626ec8f5c9612e7/jdymusic/obj/wo3DlMOGwrbDjj7DisKw/27979907781/5b87/a0b2/bcd0/9d0b44d4bf4a239c7f728d812c368edc.mp3",
        );
        catalog.add(
            "Cat",
            "https://m701.music.126.net/20250905061349/78d04b3d4a4f363d1be5de9743cb4daf/jdymusic/obj/wo3DlMOGwrbDjj7DisKw/15034083571/f0c7/cbb8/2ddc/2a704cd2b93e9cc4f352017f87ccf005.mp3",
        );
        catalog.add(
            "Minecraft",
            "https://m801.music.126.net/20250905053724/1e0109d1cab5cff04f73be75dbc45971/jdymusic/obj/wo3DlMOGwrbDjj7DisKw/15034086247/9ea2/cad2/42a3/c7f4dcbd4951840881e0f3ad9bddfac3.mp3",
        );
        catalog
    }

    /// Add or replace an entry
    pub fn add(&mut self, name: impl Into<String>, url: impl Into<String>) {
        let name = name.into();
        let url = url.into();

        match self.entries.iter_mut().find(|e| e.name == name) {
            Some(entry) => entry.url = url,
            None => self.entries.push(CatalogEntry { name, url }),
        }
    }

    /// Remove an entry by name
    ///
    /// Returns `true` if the entry existed.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.name != name);
        self.entries.len() != before
    }

    /// Url for an entry name
    pub fn url_for(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.url.as_str())
    }

    /// Entry names in catalog order
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }

    /// All entries in catalog order
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Export as a pretty-printed JSON object
    pub fn export_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Merge entries from a JSON object of name to url
    ///
    /// The import is all-or-nothing: a non-object document or any non-string
    /// url rejects the whole import and leaves the catalog untouched.
    /// Returns the number of entries merged.
    pub fn import_json(&mut self, json: &str) -> Result<usize> {
        let Value::Object(map) = serde_json::from_str::<Value>(json)? else {
            return Err(CoreError::CatalogNotObject);
        };

        let mut imported = Vec::with_capacity(map.len());
        for (name, value) in map {
            match value {
                Value::String(url) => imported.push((name, url)),
                _ => return Err(CoreError::InvalidCatalogEntry { name }),
            }
        }

        let count = imported.len();
        for (name, url) in imported {
            self.add(name, url);
        }

        debug!("Imported {} catalog entries", count);
        Ok(count)
    }
}

impl PlaylistSource for MusicCatalog {
    fn tracks(&self) -> Vec<Track> {
        self.entries
            .iter()
            .map(|e| Track::from_entry(&e.name, &e.url))
            .collect()
    }
}

impl Serialize for MusicCatalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.name, &entry.url)?;
        }
        map.end()
    }
}
