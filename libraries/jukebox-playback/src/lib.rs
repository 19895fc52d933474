//! Jukebox - Playback Management
//!
//! Platform-agnostic playback control for the Jukebox widget.
//!
//! This crate provides:
//! - Playback state machine (Idle, Loading, Playing, Paused, Ended, Error)
//! - Autoplay-refusal recovery (one retry on the next user gesture)
//! - Sequential and random playlist traversal
//! - Session volume (fraction in [0, 1])
//! - Best-effort metadata enrichment
//! - Event queue for UI synchronization
//!
//! # Architecture
//!
//! `jukebox-playback` does no audio work. The platform primitive is supplied
//! through the [`PlaybackSink`] trait and its notifications are forwarded as
//! [`SinkEvent`]s. Everything runs on a single thread; the only suspending
//! operations are the sink's start request and metadata lookups.
//!
//! # Example
//!
//! ```rust
//! use jukebox_core::MusicCatalog;
//! use jukebox_playback::{testing::ScriptedSink, PlaybackConfig, Player, SinkEvent};
//!
//! # tokio_test_block_on(async {
//! let (sink, _probe) = ScriptedSink::new();
//! let mut player = Player::new(sink, &MusicCatalog::builtin(), &PlaybackConfig::default());
//!
//! player.playback_mut().autoplay().await;
//! player.playback_mut().set_volume(0.5);
//!
//! // The host forwards "ended" from its primitive; the player advances once
//! player.handle_sink_event(SinkEvent::Ended).await;
//! # });
//! # fn tokio_test_block_on<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
//! # }
//! ```

mod controller;
mod error;
mod events;
mod player;
mod sink;
pub mod testing;
mod traversal;
pub mod types;
mod volume;

// Public exports
pub use controller::PlaybackController;
pub use error::{Result, SinkError};
pub use events::PlayerEvent;
pub use player::Player;
pub use sink::{PlaybackSink, SinkEvent};
pub use traversal::TraversalController;
pub use types::{
    Direction, PlayOutcome, PlaybackConfig, PlaybackStatus, PlayerState, TraversalMode,
};
pub use volume::{Volume, DEFAULT_VOLUME};
