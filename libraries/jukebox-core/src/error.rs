/// Core error types for Jukebox
use thiserror::Error;

/// Result type alias using `CoreError`
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error type
#[derive(Error, Debug)]
pub enum CoreError {
    /// Catalog JSON could not be parsed
    #[error("Catalog JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Imported catalog was valid JSON but not an object
    #[error("Catalog import must be a JSON object of name to url")]
    CatalogNotObject,

    /// Imported catalog entry had a non-string url
    #[error("Invalid catalog entry: {name}")]
    InvalidCatalogEntry {
        /// Entry name
        name: String,
    },

    /// Imported metadata cache was valid JSON but not an object
    #[error("Metadata import must be a JSON object of track id to details")]
    MetadataNotObject,

    /// Metadata lookup failed
    #[error("Metadata error: {0}")]
    Metadata(String),
}

impl CoreError {
    /// Create a metadata error
    pub fn metadata(msg: impl Into<String>) -> Self {
        Self::Metadata(msg.into())
    }
}
