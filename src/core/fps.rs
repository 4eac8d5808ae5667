// SPDX-License-Identifier: MPL-2.0
//! Frame-rate measurement for the bottom-bar FPS field.

use std::time::Instant;

/// Counts rendered frames and reports a rate once per second.
#[derive(Debug, Clone, PartialEq)]
pub struct FpsCounter {
    fps: Option<f64>,
    frames: u32,
    last_update: Instant,
}

impl FpsCounter {
    pub fn new() -> Self {
        Self {
            fps: None,
            frames: 0,
            last_update: Instant::now(),
        }
    }

    /// The most recent measurement, if one full second has elapsed.
    pub fn fps(&self) -> Option<f64> {
        self.fps
    }

    /// Records one rendered frame. `now` is injectable for tests.
    pub fn record_frame(&mut self, now: Option<Instant>) {
        self.frames += 1;
        let now = now.unwrap_or_else(Instant::now);
        let elapsed = (now - self.last_update).as_secs_f64();

        if elapsed >= 1.0 {
            self.fps = Some(self.frames as f64 / elapsed);
            self.last_update = now;
            self.frames = 0;
        }
    }
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn no_measurement_before_one_second() {
        let mut counter = FpsCounter::new();
        for _ in 0..10 {
            counter.record_frame(None);
            assert_eq!(counter.fps(), None);
        }
        assert_eq!(counter.frames, 10);
    }

    #[test]
    fn measures_after_one_second() {
        let mut counter = FpsCounter::new();
        let start = counter.last_update;

        for i in 0..59 {
            counter.record_frame(Some(start + Duration::from_millis(i * 1000 / 60)));
            assert_eq!(counter.fps(), None);
        }
        counter.record_frame(Some(start + Duration::from_secs(1)));

        let fps = counter.fps().expect("should have a measurement");
        assert!((fps - 60.0).abs() < 0.01, "expected ~60, got {fps}");
        assert_eq!(counter.frames, 0);
    }
}
