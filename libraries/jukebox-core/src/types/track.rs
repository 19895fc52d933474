/// Track domain type
use super::ids::TrackId;
use serde::{Deserialize, Serialize};

/// Title shown when a track's metadata is unavailable
pub const UNKNOWN_TITLE: &str = "Unknown Title";

/// Artist shown when a track's metadata is unavailable
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";

/// Separator between artist and title in catalog entry names
const NAME_SEPARATOR: &str = " - ";

/// A playable item
///
/// Immutable once constructed; fields are exposed through accessors only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    id: TrackId,
    display_name: String,
    artist_name: String,
    source_locator: String,
}

impl Track {
    /// Create a track with explicit metadata
    pub fn new(
        id: TrackId,
        display_name: impl Into<String>,
        artist_name: impl Into<String>,
        source_locator: impl Into<String>,
    ) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            artist_name: artist_name.into(),
            source_locator: source_locator.into(),
        }
    }

    /// Build a track from a catalog entry of the form `"Artist - Title"` and its url
    ///
    /// Names without the separator use the full name as both title and artist.
    pub fn from_entry(name: &str, url: &str) -> Self {
        let details = TrackDetails::parse_name(name);
        Self {
            id: TrackId::derive(url, name),
            display_name: details.title,
            artist_name: details.artist,
            source_locator: url.to_string(),
        }
    }

    /// Track identifier
    pub fn id(&self) -> &TrackId {
        &self.id
    }

    /// Title shown in the player
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Artist shown in the player
    pub fn artist_name(&self) -> &str {
        &self.artist_name
    }

    /// Opaque media locator handed to the playback sink
    pub fn source_locator(&self) -> &str {
        &self.source_locator
    }
}

/// Display metadata for a track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackDetails {
    /// Track title
    pub title: String,

    /// Artist name
    pub artist: String,

    /// Duration in seconds (0 until known)
    #[serde(default)]
    pub duration_secs: f64,
}

impl TrackDetails {
    /// Fallback details used when metadata cannot be loaded
    pub fn unknown() -> Self {
        Self {
            title: UNKNOWN_TITLE.to_string(),
            artist: UNKNOWN_ARTIST.to_string(),
            duration_secs: 0.0,
        }
    }

    /// Parse `"Artist - Title"`; only the first separator splits
    pub fn parse_name(name: &str) -> Self {
        let (artist, title) = match name.split_once(NAME_SEPARATOR) {
            Some((artist, title)) => {
                let title = title.split(NAME_SEPARATOR).next().unwrap_or(title);
                (artist, title)
            }
            None => (name, name),
        };

        Self {
            title: if title.is_empty() { name } else { title }.to_string(),
            artist: if artist.is_empty() { UNKNOWN_ARTIST } else { artist }.to_string(),
            duration_secs: 0.0,
        }
    }

    /// Details as currently known for a track
    pub fn of(track: &Track) -> Self {
        Self {
            title: track.display_name().to_string(),
            artist: track.artist_name().to_string(),
            duration_secs: 0.0,
        }
    }
}
