use crate::dirty::DirtyFlag;
use crate::stats::{FrameStats, FrameStatsTracker};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Smallest allowed target frame rate (configuration: `fps` allowed `1..=240`).
pub const MIN_FPS: u32 = 1;
/// Largest allowed target frame rate.
pub const MAX_FPS: u32 = 240;
/// Default target frame rate.
pub const DEFAULT_FPS: u32 = 60;

/// Clamp a requested `fps` into the allowed `1..=240` range, logging at
/// `warn` when the caller's value needed adjusting.
pub fn clamp_fps(fps: u32) -> u32 {
    let clamped = fps.clamp(MIN_FPS, MAX_FPS);
    if clamped != fps {
        tracing::warn!(requested = fps, clamped, "fps out of range, clamped");
    }
    clamped
}

/// What happened on a single call to [`FrameScheduler::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The buffer was dirty; the render callback ran and took `elapsed`.
    Rendered { elapsed: Duration },
    /// The buffer was clean; no render ran this tick.
    Skipped,
    /// The scheduler is paused; no render ran and no tick was scheduled.
    Paused,
}

/// Dirty-flag-driven, drift-compensating frame tick. Triggers at
/// most one render per interval, skips ticks when nothing changed, and
/// compensates for scheduling drift by dropping missed intervals rather
/// than ever firing two renders back-to-back to "catch up".
pub struct FrameScheduler {
    interval: Duration,
    dirty: DirtyFlag,
    paused: AtomicBool,
    next_deadline: Instant,
    stats: FrameStatsTracker,
}

impl FrameScheduler {
    pub fn new(fps: u32) -> Self {
        let fps = clamp_fps(fps);
        let interval = Duration::from_nanos(1_000_000_000 / fps as u64);
        FrameScheduler {
            interval,
            dirty: DirtyFlag::new(),
            paused: AtomicBool::new(false),
            next_deadline: Instant::now() + interval,
            stats: FrameStatsTracker::default(),
        }
    }

    /// A cloneable handle producers use to mark the buffer dirty from any
    /// thread without touching the scheduler itself.
    pub fn dirty_handle(&self) -> DirtyFlag {
        self.dirty.clone()
    }

    pub fn mark_dirty(&self) {
        self.dirty.mark();
    }

    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::Acquire)
    }

    /// Stop scheduling ticks; any tick that fires while paused returns
    /// [`TickOutcome::Paused`] without consulting the dirty flag.
    pub fn pause(&self) {
        self.paused.store(true, Ordering::Release);
    }

    /// Resume ticking, rescheduling the next deadline `interval` from
    /// `now` (rather than from whenever it last fired — pending ticks
    /// accumulated while paused are dropped, not replayed).
    pub fn resume(&mut self, now: Instant) {
        self.paused.store(false, Ordering::Release);
        self.next_deadline = now + self.interval;
    }

    pub fn stats(&self) -> FrameStats {
        self.stats.snapshot()
    }

    /// Run one tick at time `now`. If the buffer is dirty and the
    /// scheduler isn't paused, `render` runs synchronously and its wall
    /// time is measured and recorded; otherwise the tick is skipped (or
    /// reported paused) with no side effect beyond bookkeeping.
    pub fn tick(&mut self, now: Instant, render: impl FnOnce()) -> TickOutcome {
        if self.is_paused() {
            return TickOutcome::Paused;
        }
        if !self.dirty.take() {
            self.stats.record_skip();
            self.advance_deadline(now);
            return TickOutcome::Skipped;
        }
        let start = Instant::now();
        render();
        let elapsed = start.elapsed();
        self.stats.record_render(elapsed, self.interval);
        self.advance_deadline(now);
        TickOutcome::Rendered { elapsed }
    }

    /// Force a render right now, bypassing the dirty check — used for
    /// unconditional redraws (e.g. immediately after a resize).
    pub fn render_immediate(&mut self, render: impl FnOnce()) {
        self.dirty.take();
        let start = Instant::now();
        render();
        self.stats.record_render(start.elapsed(), self.interval);
    }

    /// Advance `next_deadline` past `now`, dropping any intervals that
    /// were missed entirely (drift compensation: catch up by skipping,
    /// never by firing multiple renders for one tick).
    fn advance_deadline(&mut self, now: Instant) {
        let mut deadline = self.next_deadline + self.interval;
        while deadline <= now {
            deadline += self.interval;
        }
        self.next_deadline = deadline;
    }

    /// How long the caller should sleep before the next tick, given `now`.
    /// Never less than 1 ms, per the scheduler tick step that advances the deadline.
    pub fn wait_duration(&self, now: Instant) -> Duration {
        self.next_deadline
            .checked_duration_since(now)
            .unwrap_or_default()
            .max(Duration::from_millis(1))
    }

    pub fn next_deadline(&self) -> Instant {
        self.next_deadline
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn clean_buffer_is_skipped() {
        let mut sched = FrameScheduler::new(60);
        let now = Instant::now();
        let mut rendered = false;
        let outcome = sched.tick(now, || rendered = true);
        assert_eq!(outcome, TickOutcome::Skipped);
        assert!(!rendered);
        assert_eq!(sched.stats().skipped_frames, 1);
    }

    #[test]
    fn dirty_buffer_renders_exactly_once() {
        let mut sched = FrameScheduler::new(60);
        sched.mark_dirty();
        let now = Instant::now();
        let mut count = 0;
        sched.tick(now, || count += 1);
        assert_eq!(count, 1);
        assert_eq!(sched.stats().rendered_frames, 1);
    }

    #[test]
    fn hundred_marks_in_one_window_coalesce_to_one_render() {
        let mut sched = FrameScheduler::new(60);
        for _ in 0..100 {
            sched.mark_dirty();
        }
        let now = Instant::now();
        let mut count = 0;
        sched.tick(now, || count += 1);
        assert_eq!(count, 1);
        assert_eq!(sched.stats().rendered_frames, 1);
    }

    #[test]
    fn paused_scheduler_never_renders() {
        let mut sched = FrameScheduler::new(60);
        sched.mark_dirty();
        sched.pause();
        let now = Instant::now();
        let mut rendered = false;
        let outcome = sched.tick(now, || rendered = true);
        assert_eq!(outcome, TickOutcome::Paused);
        assert!(!rendered);
    }

    #[test]
    fn resume_reschedules_from_now_plus_interval() {
        let mut sched = FrameScheduler::new(60);
        sched.pause();
        let now = Instant::now();
        sched.resume(now);
        assert!(sched.next_deadline() >= now + Duration::from_millis(16));
    }

    #[test]
    fn render_immediate_ignores_dirty_flag() {
        let mut sched = FrameScheduler::new(60);
        let mut count = 0;
        sched.render_immediate(|| count += 1);
        assert_eq!(count, 1);
        assert_eq!(sched.stats().rendered_frames, 1);
    }

    #[test]
    fn drift_compensation_drops_missed_intervals_without_double_render() {
        let mut sched = FrameScheduler::new(60);
        sched.mark_dirty();
        let far_future = Instant::now() + Duration::from_secs(5);
        let mut count = 0;
        sched.tick(far_future, || count += 1);
        assert_eq!(count, 1);
        assert!(sched.next_deadline() > far_future);
    }

    #[test]
    fn wait_duration_has_a_one_millisecond_floor() {
        let sched = FrameScheduler::new(60);
        let past_deadline = sched.next_deadline() + Duration::from_secs(1);
        assert_eq!(sched.wait_duration(past_deadline), Duration::from_millis(1));
    }

    #[test]
    fn fps_out_of_range_is_clamped() {
        assert_eq!(clamp_fps(0), MIN_FPS);
        assert_eq!(clamp_fps(10_000), MAX_FPS);
        assert_eq!(clamp_fps(60), 60);
    }
}
