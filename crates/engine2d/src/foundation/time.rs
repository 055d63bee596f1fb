//! Frame timing utilities

use std::thread;
use std::time::{Duration, Instant};

/// Target duration of one frame when capping the frame rate (~60 FPS).
const FRAME_BUDGET: Duration = Duration::from_millis(16);

/// High-precision timer driving the variable-timestep frame loop
///
/// `compute_delta_time` measures the wall-clock time since its previous
/// call; `delay_time` sleeps away whatever remains of the frame budget.
pub struct Timer {
    last_frame: Instant,
    delta_ms: f32,
    total_time: f32,
    frame_count: u64,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    /// Create a new timer
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            delta_ms: 0.0,
            total_time: 0.0,
            frame_count: 0,
        }
    }

    /// Measure the elapsed time since the previous call, in milliseconds
    ///
    /// Should be called exactly once per frame, at the top of the loop.
    pub fn compute_delta_time(&mut self) -> f32 {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_frame);
        self.delta_ms = elapsed.as_secs_f32() * 1000.0;
        self.total_time += elapsed.as_secs_f32();
        self.last_frame = now;
        self.frame_count += 1;
        self.delta_ms
    }

    /// Sleep until the current frame has consumed its full budget
    ///
    /// Caps the frame rate at roughly 60 FPS. A frame that already ran
    /// longer than the budget is not delayed further.
    pub fn delay_time(&self) {
        let elapsed = self.last_frame.elapsed();
        if elapsed < FRAME_BUDGET {
            thread::sleep(FRAME_BUDGET - elapsed);
        }
    }

    /// Time measured by the last `compute_delta_time` call, in milliseconds
    pub fn delta_ms(&self) -> f32 {
        self.delta_ms
    }

    /// Total elapsed time since timer creation, in seconds
    pub fn total_time(&self) -> f32 {
        self.total_time
    }

    /// Number of `compute_delta_time` calls so far
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Average FPS since timer creation
    pub fn average_fps(&self) -> f32 {
        if self.total_time > 0.0 {
            self.frame_count as f32 / self.total_time
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delta_time_is_nonnegative() {
        let mut timer = Timer::new();
        let dt = timer.compute_delta_time();
        assert!(dt >= 0.0);
        assert_eq!(timer.frame_count(), 1);
    }

    #[test]
    fn test_delta_time_measures_elapsed() {
        let mut timer = Timer::new();
        thread::sleep(Duration::from_millis(5));
        let dt = timer.compute_delta_time();
        assert!(dt >= 4.0, "expected at least ~5ms, got {dt}");
    }

    #[test]
    fn test_delay_time_fills_frame_budget() {
        let mut timer = Timer::new();
        timer.compute_delta_time();
        let start = Instant::now();
        timer.delay_time();
        assert!(start.elapsed() <= FRAME_BUDGET + Duration::from_millis(10));
    }
}
