/// Jukebox Simulator - headless driver for the player widget
pub mod config;
pub mod error;
pub mod session;
pub mod sink;

pub use config::SimConfig;
pub use error::{Result, SimError};
pub use session::{load_catalog, load_metadata, run_session, SessionOptions, SessionReport};
pub use sink::{SimulatedSink, UserActivation};
