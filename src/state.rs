use std::sync::Arc;
use std::time::Duration;

use crate::color::SeriesColors;
use crate::config::AnimationConfig;
use crate::data::model::{TimeKey, TimeSeries};
use crate::frame::Frame;

// ---------------------------------------------------------------------------
// Playback – the animation clock
// ---------------------------------------------------------------------------

/// Tracks the current frame index and advances it on a fixed interval,
/// wrapping back to the first frame after the last one.
#[derive(Debug, Clone)]
pub struct Playback {
    len: usize,
    current: usize,
    interval: f64,
    /// Time stamp (seconds) of the last frame change.
    last_tick: Option<f64>,
    pub running: bool,
}

impl Playback {
    pub fn new(len: usize, interval: Duration) -> Self {
        Self {
            len,
            current: 0,
            interval: interval.as_secs_f64(),
            last_tick: None,
            running: true,
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    /// Advance one frame if running and at least one interval has passed
    /// since the last change. The first call only starts the clock.
    /// Returns whether the frame changed.
    pub fn tick(&mut self, now: f64) -> bool {
        if !self.running || self.len == 0 {
            return false;
        }
        match self.last_tick {
            None => {
                self.last_tick = Some(now);
                false
            }
            Some(last) if now - last >= self.interval => {
                self.step();
                self.last_tick = Some(now);
                true
            }
            Some(_) => false,
        }
    }

    /// Move to the next frame unconditionally.
    pub fn step(&mut self) {
        if self.len > 0 {
            self.current = (self.current + 1) % self.len;
        }
    }

    /// Pause or resume. Resuming restarts the interval clock.
    pub fn toggle(&mut self) {
        self.running = !self.running;
        self.last_tick = None;
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub series: Arc<TimeSeries>,

    /// Distinct time values in playback order.
    pub times: Vec<TimeKey>,

    pub config: AnimationConfig,

    pub playback: Playback,

    pub colors: SeriesColors,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(series: Arc<TimeSeries>, config: AnimationConfig) -> Self {
        let times: Vec<TimeKey> = series.times().collect();
        let playback = Playback::new(times.len(), config.interval);
        Self {
            series,
            times,
            config,
            playback,
            colors: SeriesColors::default(),
            status_message: None,
        }
    }

    /// Build the frame for the current playback position.
    pub fn current_frame(&mut self) -> Option<Frame> {
        let time = *self.times.get(self.playback.current())?;
        match Frame::build(&self.series, time) {
            Ok(frame) => Some(frame),
            Err(e) => {
                log::error!("Failed to render frame: {e}");
                self.status_message = Some(format!("Error: {e}"));
                None
            }
        }
    }
}
