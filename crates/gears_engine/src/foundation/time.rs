//! Frame timing and throughput reporting

use std::fmt;
use std::time::{Duration, Instant};

/// Per-frame delta timer.
pub struct Timer {
    last_frame: Instant,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    /// Create a timer starting now.
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
        }
    }

    /// Advance the timer and return the time since the previous tick in seconds.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let delta = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        delta
    }
}

/// Frames-per-interval counter behind the periodic throughput report.
///
/// The counter has no correctness role in the demo; it only feeds the
/// stdout report line emitted once per interval.
pub struct FpsCounter {
    interval: Duration,
    frames: u32,
    interval_start: Instant,
}

impl FpsCounter {
    /// How often a report is produced.
    pub const REPORT_INTERVAL: Duration = Duration::from_secs(5);

    /// Create a counter whose first interval starts at `now`.
    pub fn new(now: Instant) -> Self {
        Self {
            interval: Self::REPORT_INTERVAL,
            frames: 0,
            interval_start: now,
        }
    }

    /// Record one rendered frame.
    pub fn frame(&mut self) {
        self.frames += 1;
    }

    /// Produce a report once the interval has elapsed, resetting the counter.
    ///
    /// Returns `None` while the current interval is still running.
    pub fn tick(&mut self, now: Instant) -> Option<FpsReport> {
        if now.duration_since(self.interval_start) < self.interval {
            return None;
        }
        let report = FpsReport {
            frames: self.frames,
            interval_secs: self.interval.as_secs(),
            fps: self.frames as f32 / self.interval.as_secs_f32(),
        };
        self.frames = 0;
        self.interval_start = now;
        Some(report)
    }
}

/// One line of the periodic throughput report.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FpsReport {
    /// Frames rendered during the interval.
    pub frames: u32,
    /// Length of the interval in whole seconds.
    pub interval_secs: u64,
    /// Frames divided by the interval length.
    pub fps: f32,
}

impl fmt::Display for FpsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} frames in {} seconds = {:.2} fps",
            self.frames, self.interval_secs, self.fps
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_report_before_interval() {
        let t0 = Instant::now();
        let mut counter = FpsCounter::new(t0);
        for _ in 0..100 {
            counter.frame();
        }
        assert_eq!(counter.tick(t0 + Duration::from_secs(4)), None);
        assert_eq!(counter.tick(t0 + Duration::from_millis(4999)), None);
    }

    #[test]
    fn test_report_at_exact_interval() {
        let t0 = Instant::now();
        let mut counter = FpsCounter::new(t0);
        for _ in 0..237 {
            counter.frame();
        }

        let report = counter
            .tick(t0 + Duration::from_secs(5))
            .expect("interval elapsed");
        assert_eq!(report.frames, 237);
        assert_eq!(report.interval_secs, 5);
        assert!((report.fps - 47.4).abs() < 1e-4);
    }

    #[test]
    fn test_counter_resets_after_report() {
        let t0 = Instant::now();
        let mut counter = FpsCounter::new(t0);
        for _ in 0..10 {
            counter.frame();
        }
        counter.tick(t0 + Duration::from_secs(5)).expect("report");

        // The next interval starts fresh from the report timestamp.
        for _ in 0..20 {
            counter.frame();
        }
        assert_eq!(counter.tick(t0 + Duration::from_secs(9)), None);
        let report = counter
            .tick(t0 + Duration::from_secs(10))
            .expect("second interval elapsed");
        assert_eq!(report.frames, 20);
    }

    #[test]
    fn test_report_format() {
        let report = FpsReport {
            frames: 237,
            interval_secs: 5,
            fps: 47.4,
        };
        assert_eq!(report.to_string(), "237 frames in 5 seconds = 47.40 fps");
    }
}
