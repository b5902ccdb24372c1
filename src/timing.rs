//! Frame timing for the fps readout.

use std::{collections::VecDeque, time::Instant};

/// Number of frames the average is taken over.
pub const FRAME_WINDOW: usize = 60;

/// Rolling average of the last [`FRAME_WINDOW`] frame durations.
pub struct FrameTimer {
    last_frame: Instant,
    durations: VecDeque<f32>,
    total: f32,
}

impl FrameTimer {
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            durations: VecDeque::with_capacity(FRAME_WINDOW),
            total: 0.0,
        }
    }

    /// Marks the start of a new frame and returns the time since the previous one in seconds.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let delta = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.record(delta);
        delta
    }

    /// Adds one frame duration to the window.
    pub fn record(&mut self, delta: f32) {
        if self.durations.len() == FRAME_WINDOW
            && let Some(oldest) = self.durations.pop_front()
        {
            self.total -= oldest;
        }
        self.durations.push_back(delta);
        self.total += delta;
    }

    /// Average frames per second over the window, `0.0` until a non-zero duration was recorded.
    pub fn average_fps(&self) -> f32 {
        if self.durations.is_empty() || self.total <= 0.0 {
            return 0.0;
        }
        self.durations.len() as f32 / self.total
    }
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_timer_reports_zero() {
        let timer = FrameTimer::new();
        assert_eq!(timer.average_fps(), 0.0);
    }

    #[test]
    fn averages_recorded_frames() {
        let mut timer = FrameTimer::new();
        timer.record(1.0 / 50.0);
        timer.record(1.0 / 100.0);
        // 2 frames in 0.03s
        assert!((timer.average_fps() - 66.666_67).abs() < 1e-2);
    }

    #[test]
    fn old_frames_leave_the_window() {
        let mut timer = FrameTimer::new();
        for _ in 0..FRAME_WINDOW {
            timer.record(1.0);
        }
        assert!((timer.average_fps() - 1.0).abs() < 1e-4);

        for _ in 0..FRAME_WINDOW {
            timer.record(0.01);
        }
        assert!((timer.average_fps() - 100.0).abs() < 0.1);
    }

    #[test]
    fn tick_returns_elapsed_time() {
        let mut timer = FrameTimer::new();
        let delta = timer.tick();
        assert!(delta >= 0.0);
    }
}
