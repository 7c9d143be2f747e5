use std::time::Instant;

use crate::frame::FrameInfo;

/// Frame clock: current time, previous time and their difference.
/// Recomputed once per loop iteration.
#[derive(Debug)]
pub struct FrameClock {
    start: Instant,
    previous: f32,
    frame_number: u64,
}

impl FrameClock {
    /// Create new clock starting now
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            previous: 0.0,
            frame_number: 0,
        }
    }

    /// Sample the wall clock and advance one frame
    pub fn tick(&mut self) -> FrameInfo {
        let now = self.start.elapsed().as_secs_f32();
        self.advance_to(now)
    }

    /// Advance to an explicit time in seconds since start.
    /// A time earlier than the previous frame yields a zero delta.
    pub fn advance_to(&mut self, current: f32) -> FrameInfo {
        let delta = (current - self.previous).max(0.0);
        self.previous = current.max(self.previous);

        let info = FrameInfo::new(self.frame_number, self.previous, delta);
        self.frame_number += 1;
        info
    }

    /// Restart at time zero, e.g. after a long blocking setup
    pub fn reset(&mut self) {
        self.start = Instant::now();
        self.previous = 0.0;
        self.frame_number = 0;
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_number
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
