// SPDX-License-Identifier: MPL-2.0
//! Timer-driven hover fade for buttons.
//!
//! The fade runs over a fixed duration with an ease-out curve; re-hovering
//! mid-flight reverses direction in place, continuing from the current
//! progress rather than restarting.

use crate::ui::design_tokens::animation;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Forward,
    Backward,
}

/// Progress of one button's hover overlay fade.
#[derive(Debug, Clone)]
pub struct HoverAnimation {
    /// Linear time position in [0, 1].
    t: f32,
    direction: Direction,
    running: bool,
}

impl HoverAnimation {
    pub fn new() -> Self {
        Self {
            t: 0.0,
            direction: Direction::Backward,
            running: false,
        }
    }

    /// Starts fading in; a running fade just reverses.
    pub fn forward(&mut self) {
        self.direction = Direction::Forward;
        if self.t < 1.0 {
            self.running = true;
        }
    }

    /// Starts fading out; a running fade just reverses.
    pub fn backward(&mut self) {
        self.direction = Direction::Backward;
        if self.t > 0.0 {
            self.running = true;
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Eased overlay opacity in [0, 1].
    pub fn value(&self) -> f32 {
        ease_out(self.t)
    }

    /// Advances by `dt`; returns true when the value changed.
    pub fn tick(&mut self, dt: Duration) -> bool {
        if !self.running {
            return false;
        }
        let step = dt.as_secs_f32() / animation::HOVER.as_secs_f32();
        let before = self.t;
        match self.direction {
            Direction::Forward => {
                self.t = (self.t + step).min(1.0);
                if self.t >= 1.0 {
                    self.running = false;
                }
            }
            Direction::Backward => {
                self.t = (self.t - step).max(0.0);
                if self.t <= 0.0 {
                    self.running = false;
                }
            }
        }
        self.t != before
    }
}

impl Default for HoverAnimation {
    fn default() -> Self {
        Self::new()
    }
}

/// Sine ease-out: fast start, gentle settle.
fn ease_out(t: f32) -> f32 {
    (t * std::f32::consts::FRAC_PI_2).sin()
}
