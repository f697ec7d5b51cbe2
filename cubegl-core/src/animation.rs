/// Animation driver state machine and frame clock
///
/// The host scheduler (`requestAnimationFrame` in the browser) owns the actual
/// callback; this module decides whether a callback should draw and how much
/// time it covers.
use crate::error::{RenderError, Result};

/// Converts host timestamps (milliseconds) into per-frame deltas (seconds)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameClock {
    last: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds since the previous tick. The first tick only records its
    /// timestamp and returns zero.
    pub fn tick(&mut self, now_ms: f64) -> f32 {
        let delta = match self.last {
            Some(last) => ((now_ms - last) * 0.001) as f32,
            None => 0.0,
        };
        self.last = Some(now_ms);
        delta
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationState {
    Stopped,
    Running,
}

/// Decides which animation-frame callbacks draw
///
/// A driver starts STOPPED, runs once it is started and returns to STOPPED
/// for good when cancelled.
#[derive(Debug)]
pub struct AnimationDriver {
    state: AnimationState,
    clock: FrameClock,
    cancelled: bool,
    frames: u64,
}

impl AnimationDriver {
    pub fn new() -> Self {
        Self {
            state: AnimationState::Stopped,
            clock: FrameClock::new(),
            cancelled: false,
            frames: 0,
        }
    }

    pub fn state(&self) -> AnimationState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == AnimationState::Running
    }

    /// Frames drawn so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn start(&mut self) -> Result<()> {
        if self.cancelled {
            return Err(RenderError::AnimationCancelled);
        }
        if self.state == AnimationState::Stopped {
            self.clock.reset();
            self.state = AnimationState::Running;
        }
        Ok(())
    }

    pub fn cancel(&mut self) {
        self.state = AnimationState::Stopped;
        self.cancelled = true;
    }

    /// Called at the top of every animation-frame callback. Returns the
    /// delta time to draw with, or `None` when the frame must not be drawn.
    pub fn begin_frame(&mut self, now_ms: f64) -> Option<f32> {
        if self.state != AnimationState::Running {
            return None;
        }
        self.frames += 1;
        Some(self.clock.tick(now_ms))
    }
}

impl Default for AnimationDriver {
    fn default() -> Self {
        Self::new()
    }
}
