//! Scripted sink for exercising controllers without a platform
//!
//! `ScriptedSink` records every call into a shared log that the paired
//! `SinkProbe` can read after the sink has been moved into a controller.

use crate::error::{Result, SinkError};
use crate::sink::PlaybackSink;
use async_trait::async_trait;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

#[derive(Debug, Default)]
struct SinkLog {
    attached: Vec<String>,
    detach_calls: usize,
    play_calls: usize,
    pause_calls: usize,
    last_volume: Option<f32>,
    last_position: Option<f64>,
    play_results: VecDeque<Result<()>>,
    reject_all: Option<SinkError>,
}

/// In-memory sink driven by a script of start results
#[derive(Debug)]
pub struct ScriptedSink {
    log: Rc<RefCell<SinkLog>>,
}

/// Read and script access to a `ScriptedSink`
#[derive(Debug, Clone)]
pub struct SinkProbe {
    log: Rc<RefCell<SinkLog>>,
}

impl ScriptedSink {
    /// Create a sink that accepts every start request, plus its probe
    pub fn new() -> (Self, SinkProbe) {
        let log = Rc::new(RefCell::new(SinkLog::default()));
        (Self { log: Rc::clone(&log) }, SinkProbe { log })
    }
}

impl SinkProbe {
    /// Refuse the next start request with `error`
    pub fn reject_next_play(&self, error: SinkError) {
        self.log.borrow_mut().play_results.push_back(Err(error));
    }

    /// Refuse every start request until [`SinkProbe::allow_play`]
    pub fn reject_all_plays(&self, error: SinkError) {
        self.log.borrow_mut().reject_all = Some(error);
    }

    /// Stop refusing start requests
    pub fn allow_play(&self) {
        self.log.borrow_mut().reject_all = None;
    }

    /// Locators attached so far, in order
    pub fn attached(&self) -> Vec<String> {
        self.log.borrow().attached.clone()
    }

    /// Number of attach calls
    pub fn attach_calls(&self) -> usize {
        self.log.borrow().attached.len()
    }

    /// Attached sources not yet detached
    pub fn active_bindings(&self) -> usize {
        let log = self.log.borrow();
        log.attached.len() - log.detach_calls
    }

    /// Number of start requests
    pub fn play_calls(&self) -> usize {
        self.log.borrow().play_calls
    }

    /// Number of pause calls
    pub fn pause_calls(&self) -> usize {
        self.log.borrow().pause_calls
    }

    /// Last volume applied
    pub fn last_volume(&self) -> Option<f32> {
        self.log.borrow().last_volume
    }

    /// Last position set
    pub fn last_position(&self) -> Option<f64> {
        self.log.borrow().last_position
    }
}

#[async_trait(?Send)]
impl PlaybackSink for ScriptedSink {
    fn attach(&mut self, locator: &str) {
        let mut log = self.log.borrow_mut();
        assert_eq!(
            log.attached.len(),
            log.detach_calls,
            "attach while another source is bound"
        );
        log.attached.push(locator.to_string());
    }

    fn detach(&mut self) {
        self.log.borrow_mut().detach_calls += 1;
    }

    async fn play(&mut self) -> Result<()> {
        let mut log = self.log.borrow_mut();
        log.play_calls += 1;
        if let Some(error) = log.reject_all.clone() {
            return Err(error);
        }
        log.play_results.pop_front().unwrap_or(Ok(()))
    }

    fn pause(&mut self) {
        self.log.borrow_mut().pause_calls += 1;
    }

    fn set_position(&mut self, seconds: f64) {
        self.log.borrow_mut().last_position = Some(seconds);
    }

    fn set_volume(&mut self, volume: f32) {
        self.log.borrow_mut().last_volume = Some(volume);
    }
}
