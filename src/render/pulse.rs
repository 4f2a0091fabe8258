use std::time::Duration;

use crate::game::{Cell, Color};

/// Scale the fruit peaks at halfway through the pulse
pub const PEAK_SCALE: f32 = 2.0;

/// Scale-up-and-back animation played on the fruit when it is eaten
///
/// The animation is fire-and-forget from the session's point of view: the
/// frame loop advances it and reports completion back so the fruit can move.
#[derive(Debug, Clone, PartialEq)]
pub struct FruitPulse {
    duration: Duration,
    elapsed: Duration,
    target: Option<(Cell, Color)>,
}

impl FruitPulse {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            elapsed: Duration::ZERO,
            target: None,
        }
    }

    /// Restart the animation on the given fruit
    pub fn start(&mut self, cell: Cell, color: Color) {
        self.elapsed = Duration::ZERO;
        self.target = Some((cell, color));
    }

    /// Drop an in-flight animation without reporting completion
    pub fn cancel(&mut self) {
        self.target = None;
    }

    /// Advance by one frame; returns true exactly once, on the frame the
    /// animation finishes
    pub fn update(&mut self, delta: Duration) -> bool {
        if self.target.is_none() {
            return false;
        }

        self.elapsed += delta;
        if self.elapsed >= self.duration {
            self.target = None;
            return true;
        }
        false
    }

    pub fn is_active(&self) -> bool {
        self.target.is_some()
    }

    pub fn target(&self) -> Option<(Cell, Color)> {
        self.target
    }

    /// Current scale factor: 1.0 when idle, rising linearly to
    /// [`PEAK_SCALE`] and back
    pub fn scale(&self) -> f32 {
        if self.target.is_none() || self.duration.is_zero() {
            return 1.0;
        }

        let progress = (self.elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0);
        let rise = if progress <= 0.5 {
            progress * 2.0
        } else {
            (1.0 - progress) * 2.0
        };
        1.0 + (PEAK_SCALE - 1.0) * rise
    }
}
