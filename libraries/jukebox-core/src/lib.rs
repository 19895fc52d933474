//! Jukebox Core
//!
//! Platform-agnostic building blocks shared by the playback and widget crates.
//!
//! This crate defines:
//! - **Domain Types**: `Track`, `TrackId`, `TrackDetails`
//! - **Playlist seam**: the `PlaylistSource` trait and the default `MusicCatalog`
//! - **Metadata seam**: the async `MetadataProvider` trait and the `MetadataCache`
//! - **Error Handling**: `CoreError` and `Result`
//!
//! # Example
//!
//! ```rust
//! use jukebox_core::{MusicCatalog, PlaylistSource};
//!
//! let mut catalog = MusicCatalog::new();
//! catalog.add("C418 - Sweden", "https://cdn.example.org/music/sweden.mp3");
//!
//! let tracks = catalog.tracks();
//! assert_eq!(tracks.len(), 1);
//! assert_eq!(tracks[0].artist_name(), "C418");
//! assert_eq!(tracks[0].display_name(), "Sweden");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod metadata;
pub mod playlist;
pub mod types;

pub use error::{CoreError, Result};
pub use metadata::{MetadataCache, MetadataProvider, NameParsingMetadata};
pub use playlist::{CatalogEntry, MusicCatalog, PlaylistSource};
pub use types::{format_clock, Track, TrackDetails, TrackId};
