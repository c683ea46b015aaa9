//! Playback over simulation frames

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use super::SimulationFrame;

/// Slowest accepted playback speed
pub const MIN_SPEED: f64 = 0.1;
/// Fastest accepted playback speed
pub const MAX_SPEED: f64 = 10.0;
/// Frame delay at 1x, in milliseconds
pub const BASE_FRAME_DELAY_MS: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackState {
    Stopped,
    Playing,
    Paused,
}

/// Steps through a frame list at an adjustable speed
///
/// Above 1x each tick skips `ceil(speed)` frames and the delay shrinks with
/// the square root of the speed.
#[derive(Debug, Clone)]
pub struct Playback {
    frames: Vec<SimulationFrame>,
    current: usize,
    speed: f64,
    state: PlaybackState,
}

impl Playback {
    pub fn new(frames: Vec<SimulationFrame>) -> Self {
        Self {
            frames,
            current: 0,
            speed: 1.0,
            state: PlaybackState::Stopped,
        }
    }

    pub fn with_speed(mut self, speed: f64) -> Self {
        self.set_speed(speed);
        self
    }

    /// Replace the frame list, e.g. after regenerating a program
    pub fn load(&mut self, frames: Vec<SimulationFrame>) {
        debug!("Loaded {} frames for playback", frames.len());
        self.frames = frames;
        self.current = 0;
        self.state = PlaybackState::Stopped;
    }

    pub fn frames(&self) -> &[SimulationFrame] {
        &self.frames
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_frame(&self) -> Option<&SimulationFrame> {
        self.frames.get(self.current)
    }

    /// Frames already travelled, including the current one
    pub fn trail(&self) -> &[SimulationFrame] {
        if self.frames.is_empty() {
            &[]
        } else {
            &self.frames[..=self.current]
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Set the speed multiplier, clamped to [`MIN_SPEED`]..=[`MAX_SPEED`]
    ///
    /// Non-finite values are ignored.
    pub fn set_speed(&mut self, speed: f64) {
        if speed.is_finite() {
            self.speed = speed.clamp(MIN_SPEED, MAX_SPEED);
        }
    }

    /// Start or resume. Returns false when there is nothing to play.
    pub fn play(&mut self) -> bool {
        if self.frames.is_empty() {
            return false;
        }
        self.state = PlaybackState::Playing;
        true
    }

    pub fn pause(&mut self) {
        if self.state == PlaybackState::Playing {
            self.state = PlaybackState::Paused;
        }
    }

    /// Switch between playing and paused
    pub fn toggle_pause(&mut self) -> bool {
        match self.state {
            PlaybackState::Playing => {
                self.pause();
                true
            }
            _ => self.play(),
        }
    }

    /// Rewind to the first frame and start playing
    pub fn restart(&mut self) -> bool {
        self.current = 0;
        self.play()
    }

    /// Frames advanced per tick
    pub fn step_size(&self) -> usize {
        if self.speed <= 1.0 {
            1
        } else {
            self.speed.ceil() as usize
        }
    }

    /// Wait between ticks
    pub fn frame_delay(&self) -> Duration {
        let ms = if self.speed <= 1.0 {
            BASE_FRAME_DELAY_MS / self.speed
        } else {
            BASE_FRAME_DELAY_MS / self.speed.sqrt()
        };
        Duration::from_micros((ms * 1000.0).round() as u64)
    }

    /// Advance one tick
    ///
    /// Returns the new current frame, or `None` when not playing or when the
    /// end was reached. Reaching the end stops playback and rewinds.
    pub fn tick(&mut self) -> Option<&SimulationFrame> {
        if self.state != PlaybackState::Playing {
            return None;
        }

        let last = self.frames.len().saturating_sub(1);
        if self.current >= last {
            debug!("Playback finished after {} frames", self.frames.len());
            self.state = PlaybackState::Stopped;
            self.current = 0;
            return None;
        }

        self.current = (self.current + self.step_size()).min(last);
        self.frames.get(self.current)
    }
}
