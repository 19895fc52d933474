/// ID types for Jukebox entities
use serde::{Deserialize, Serialize};
use std::fmt;

/// Length of the hex digest some media CDNs embed in their paths
const DIGEST_LEN: usize = 32;

/// Track identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackId(String);

impl TrackId {
    /// Create a new track ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Derive an ID from a media url, falling back to the entry name
    ///
    /// The first path segment made of exactly 32 lowercase hex digits and
    /// enclosed by slashes on both sides is used. Urls without such a
    /// segment use `fallback`.
    pub fn derive(url: &str, fallback: &str) -> Self {
        let segments: Vec<&str> = url.split('/').collect();
        let inner = segments
            .get(1..segments.len().saturating_sub(1))
            .unwrap_or_default();

        inner
            .iter()
            .find(|segment| is_digest(segment))
            .map_or_else(|| Self::new(fallback), |digest| Self::new(*digest))
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_digest(segment: &str) -> bool {
    segment.len() == DIGEST_LEN
        && segment
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_digest_segment() {
        let url = "https://cdn.example.org/20250905/56b08bf6628076c0f626ec8f5c9612e7/obj/track.mp3";
        let id = TrackId::derive(url, "Stal");
        assert_eq!(id.as_str(), "56b08bf6628076c0f626ec8f5c9612e7");
    }

    #[test]
    fn falls_back_to_name_without_digest() {
        let id = TrackId::derive("https://cdn.example.org/music/song.mp3", "Song");
        assert_eq!(id.as_str(), "Song");
    }

    #[test]
    fn trailing_digest_is_not_enclosed() {
        // No slash after the digest, so it does not count
        let id = TrackId::derive("https://cdn.example.org/56b08bf6628076c0f626ec8f5c9612e7", "x");
        assert_eq!(id.as_str(), "x");
    }

    #[test]
    fn uppercase_hex_is_rejected() {
        let id = TrackId::derive("/56B08BF6628076C0F626EC8F5C9612E7/a.mp3", "x");
        assert_eq!(id.as_str(), "x");
    }

    #[test]
    fn empty_url_uses_fallback() {
        assert_eq!(TrackId::derive("", "name").as_str(), "name");
    }
}
