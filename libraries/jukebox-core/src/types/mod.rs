//! Domain types

mod clock;
mod ids;
mod track;

pub use clock::format_clock;
pub use ids::TrackId;
pub use track::{Track, TrackDetails, UNKNOWN_ARTIST, UNKNOWN_TITLE};
