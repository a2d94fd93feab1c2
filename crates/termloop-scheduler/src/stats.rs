use std::collections::VecDeque;
use std::time::Duration;

/// How many recent render durations [`FrameStatsTracker`] keeps for the
/// rolling average.
const ROLLING_WINDOW: usize = 120;

/// Point-in-time snapshot of the scheduler's running counters, returned by
/// [`crate::FrameScheduler::stats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub rendered_frames: u64,
    pub skipped_frames: u64,
    pub slow_frames: u64,
    pub avg_render_time_us: u64,
}

/// Tracks the counters in [`FrameStats`] plus the rolling window of recent
/// render durations the average is computed from.
#[derive(Debug, Default)]
pub(crate) struct FrameStatsTracker {
    rendered_frames: u64,
    skipped_frames: u64,
    slow_frames: u64,
    recent: VecDeque<Duration>,
}

impl FrameStatsTracker {
    pub fn record_skip(&mut self) {
        self.skipped_frames += 1;
    }

    /// Record a completed render of `elapsed` duration against a
    /// `budget` (the `1000/fps` ms target target).
    pub fn record_render(&mut self, elapsed: Duration, budget: Duration) {
        self.rendered_frames += 1;
        if elapsed > budget {
            self.slow_frames += 1;
        }
        if self.recent.len() == ROLLING_WINDOW {
            self.recent.pop_front();
        }
        self.recent.push_back(elapsed);
    }

    pub fn snapshot(&self) -> FrameStats {
        let avg_render_time_us = if self.recent.is_empty() {
            0
        } else {
            let total: u128 = self.recent.iter().map(|d| d.as_micros()).sum();
            (total / self.recent.len() as u128) as u64
        };
        FrameStats {
            rendered_frames: self.rendered_frames,
            skipped_frames: self.skipped_frames,
            slow_frames: self.slow_frames,
            avg_render_time_us,
        }
    }
}
