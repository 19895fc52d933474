//! Session tests
//!
//! Run the scripted session end to end against the simulated sink.

use jukebox_core::{MetadataCache, MusicCatalog, PlaylistSource, TrackDetails};
use jukebox_playback::{PlaybackStatus, PlayerEvent, TraversalMode};
use jukebox_sim::{load_catalog, load_metadata, run_session, SessionOptions, SimConfig, SimError};
use jukebox_widget::Point;
use std::io::Write;

// ===== Helpers =====

fn sequential() -> SimConfig {
    let mut config = SimConfig::default();
    config.widget.playback.traversal_mode = TraversalMode::Sequential;
    config
}

fn options(plays: usize) -> SessionOptions {
    SessionOptions {
        plays,
        seed: Some(7),
        ..Default::default()
    }
}

// ===== Autoplay =====

#[tokio::test]
async fn test_blocked_autoplay_recovers_on_first_gesture() {
    let report = run_session(&sequential(), &MusicCatalog::builtin(), &options(0)).await;

    let mount = report.step("mount").unwrap();
    assert_eq!(mount.view.player.status, PlaybackStatus::Paused);
    assert!(mount
        .events
        .iter()
        .any(|e| matches!(e, PlayerEvent::AutoplayBlocked { .. })));

    let gesture = report.step("first-gesture").unwrap();
    assert_eq!(gesture.view.player.status, PlaybackStatus::Playing);
    assert_eq!(gesture.view.player.current_track_index, Some(0));
}

#[tokio::test]
async fn test_unrestricted_sink_plays_at_mount() {
    let mut config = sequential();
    config.session.require_activation = false;

    let report = run_session(&config, &MusicCatalog::builtin(), &options(0)).await;

    let mount = report.step("mount").unwrap();
    assert_eq!(mount.view.player.status, PlaybackStatus::Playing);
    assert!(report.step("first-gesture").unwrap().events.is_empty());
}

// ===== Interaction =====

#[tokio::test]
async fn test_scripted_interactions() {
    let report = run_session(&sequential(), &MusicCatalog::builtin(), &options(0)).await;

    let mount = report.step("mount").unwrap();
    assert_eq!(mount.view.position, Point::new(20.0, 640.0));
    let now_playing = mount.view.now_playing.as_ref().unwrap();
    assert_eq!(now_playing.title, "Stal");
    assert_eq!(now_playing.artist, "Stal");

    assert!(report.step("open-panel").unwrap().view.is_open);
    assert_eq!(report.step("volume").unwrap().view.player.volume.get(), 0.75);

    let drag = report.step("drag").unwrap();
    assert_eq!(drag.view.position, Point::new(0.0, 0.0));
    assert!(drag.view.is_open, "dragging must not toggle the panel");

    assert!(!report.step("escape").unwrap().view.is_open);
    assert!(report.listeners_released);
}

#[tokio::test]
async fn test_sequential_play_through_wraps() {
    let report = run_session(&sequential(), &MusicCatalog::builtin(), &options(3)).await;

    let played: Vec<_> = report
        .steps
        .iter()
        .filter(|record| record.step == "playing")
        .map(|record| record.view.player.current_track_index)
        .collect();
    assert_eq!(played, vec![Some(0), Some(1), Some(2)]);

    let playing = report.step("playing").unwrap();
    assert_eq!(playing.view.elapsed, "1:30");
    assert_eq!(playing.view.total, "3:00");

    let done = report.step("played-through").unwrap();
    assert_eq!(done.view.player.current_track_index, Some(0));
    assert_eq!(done.view.player.status, PlaybackStatus::Playing);
}

#[tokio::test]
async fn test_random_play_through_stays_in_bounds() {
    let report = run_session(&SimConfig::default(), &MusicCatalog::builtin(), &options(20)).await;

    for record in &report.steps {
        let index = record.view.player.current_track_index.unwrap();
        assert!(index < report.tracks);
    }
}

#[tokio::test]
async fn test_empty_catalog_session() {
    let report = run_session(&sequential(), &MusicCatalog::new(), &options(2)).await;

    assert_eq!(report.tracks, 0);
    for record in &report.steps {
        assert_eq!(record.view.player.current_track_index, None);
        assert!(!record.view.transport_enabled);
    }
    assert!(report.listeners_released);
}

// ===== Catalog loading =====

#[test]
fn test_load_catalog_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"Artist - Song": "https://cdn.example.org/0123456789abcdef0123456789abcdef/song.mp3"}}"#
    )
    .unwrap();

    let mut config = SimConfig::default();
    config.session.catalog_path = Some(file.path().to_path_buf());

    let catalog = load_catalog(&config).unwrap();
    assert_eq!(catalog.names(), vec!["Artist - Song"]);
}

#[test]
fn test_load_catalog_rejects_non_object() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "[1, 2, 3]").unwrap();

    let mut config = SimConfig::default();
    config.session.catalog_path = Some(file.path().to_path_buf());

    assert!(matches!(load_catalog(&config), Err(SimError::Catalog(_))));
}

#[test]
fn test_default_catalog_is_builtin() {
    let catalog = load_catalog(&SimConfig::default()).unwrap();
    assert_eq!(catalog.len(), MusicCatalog::builtin().len());
}

// ===== Metadata cache =====

#[tokio::test]
async fn test_imported_metadata_is_shown_and_reported() {
    let catalog = MusicCatalog::builtin();
    let first = catalog.tracks()[0].id().clone();

    let mut metadata = MetadataCache::new();
    metadata.set(
        first.clone(),
        TrackDetails {
            title: "Stal".to_string(),
            artist: "C418".to_string(),
            duration_secs: 150.0,
        },
    );
    let options = SessionOptions {
        plays: 0,
        seed: Some(7),
        metadata,
    };

    let report = run_session(&sequential(), &catalog, &options).await;

    let now_playing = report.step("mount").unwrap().view.now_playing.clone().unwrap();
    assert_eq!(now_playing.artist, "C418");
    assert_eq!(report.metadata.len(), catalog.len());
    assert_eq!(report.metadata.get(&first).unwrap().artist, "C418");
}

#[test]
fn test_load_metadata_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{"stal": {{"title": "Stal", "artist": "C418", "duration_secs": 150.0}}}}"#)
        .unwrap();

    let mut config = SimConfig::default();
    config.session.metadata_path = Some(file.path().to_path_buf());

    let cache = load_metadata(&config).unwrap();
    assert_eq!(cache.len(), 1);
    assert!(load_metadata(&SimConfig::default()).unwrap().is_empty());
}
