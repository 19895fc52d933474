/// Simulator error types
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SimError>;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Catalog or metadata error: {0}")]
    Catalog(#[from] jukebox_core::CoreError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
