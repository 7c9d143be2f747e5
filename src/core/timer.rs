/// Frames-per-second counter. Accumulates frame deltas and publishes a new
/// average once per reporting interval.
#[derive(Debug, Clone, Copy)]
pub struct FpsCounter {
    interval: f32,
    elapsed: f32,
    frames: u32,
    fps: f32,
}

impl FpsCounter {
    /// Create counter that reports every `interval` seconds
    pub fn new(interval: f32) -> Self {
        Self {
            interval,
            elapsed: 0.0,
            frames: 0,
            fps: 0.0,
        }
    }

    /// Count one frame. Returns the fresh average when the interval elapses.
    pub fn tick(&mut self, delta: f32) -> Option<f32> {
        self.frames += 1;
        self.elapsed += delta;

        if self.elapsed >= self.interval {
            self.fps = self.frames as f32 / self.elapsed;
            self.frames = 0;
            self.elapsed = 0.0;
            Some(self.fps)
        } else {
            None
        }
    }

    /// Last published average, 0 until the first interval completes
    pub fn fps(&self) -> f32 {
        self.fps
    }
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fps_reports_once_per_interval() {
        let mut counter = FpsCounter::new(1.0);

        for _ in 0..59 {
            assert_eq!(counter.tick(1.0 / 60.0), None);
        }
        let fps = counter.tick(1.0 / 60.0 + 0.0001).expect("interval elapsed");
        assert!((fps - 60.0).abs() < 0.1);
        assert_eq!(counter.fps(), fps);
    }

    #[test]
    fn fps_starts_at_zero() {
        let counter = FpsCounter::default();
        assert_eq!(counter.fps(), 0.0);
    }

    #[test]
    fn fps_restarts_after_report() {
        let mut counter = FpsCounter::new(0.5);

        assert!(counter.tick(0.5).is_some());
        assert_eq!(counter.tick(0.1), None);
        let fps = counter.tick(0.4).expect("second interval");
        assert!((fps - 4.0).abs() < 1e-4);
    }
}
