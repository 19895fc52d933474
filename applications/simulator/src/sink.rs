/// Simulated playback sink
///
/// Stands in for a browser audio element: it logs every call and, like a
/// browser without user activation, refuses to start until the page has
/// seen a gesture.
use async_trait::async_trait;
use jukebox_playback::{PlaybackSink, Result, SinkError};
use std::cell::Cell;
use std::rc::Rc;
use tracing::{debug, info};

/// Shared flag set once the simulated user interacts with the page
#[derive(Debug, Clone, Default)]
pub struct UserActivation(Rc<Cell<bool>>);

impl UserActivation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn activate(&self) {
        self.0.set(true);
    }

    pub fn is_active(&self) -> bool {
        self.0.get()
    }
}

#[derive(Debug)]
pub struct SimulatedSink {
    locator: Option<String>,
    activation: UserActivation,
    require_activation: bool,
    playing: bool,
    position_secs: f64,
    volume: f32,
}

impl SimulatedSink {
    pub fn new(activation: UserActivation, require_activation: bool) -> Self {
        Self {
            locator: None,
            activation,
            require_activation,
            playing: false,
            position_secs: 0.0,
            volume: 1.0,
        }
    }

    pub fn locator(&self) -> Option<&str> {
        self.locator.as_deref()
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }
}

#[async_trait(?Send)]
impl PlaybackSink for SimulatedSink {
    fn attach(&mut self, locator: &str) {
        info!("Attaching {}", locator);
        self.locator = Some(locator.to_string());
        self.position_secs = 0.0;
        self.playing = false;
    }

    fn detach(&mut self) {
        if let Some(locator) = self.locator.take() {
            debug!("Detaching {}", locator);
        }
        self.playing = false;
    }

    async fn play(&mut self) -> Result<()> {
        let Some(locator) = self.locator.as_deref() else {
            return Err(SinkError::NotAttached);
        };

        if locator.is_empty() {
            return Err(SinkError::Unsupported("empty source".to_string()));
        }

        if self.require_activation && !self.activation.is_active() {
            return Err(SinkError::NotAllowed(
                "play() failed because the user didn't interact with the document first"
                    .to_string(),
            ));
        }

        self.playing = true;
        info!("Playing {} from {:.1}s", locator, self.position_secs);
        Ok(())
    }

    fn pause(&mut self) {
        self.playing = false;
        debug!("Paused at {:.1}s", self.position_secs);
    }

    fn set_position(&mut self, seconds: f64) {
        self.position_secs = seconds;
        debug!("Seeked to {:.1}s", seconds);
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
        debug!("Volume set to {:.2}", volume);
    }
}
