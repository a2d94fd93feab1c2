use crate::scheduler::{FrameScheduler, TickOutcome};
use std::time::Instant;

/// Drive `scheduler` forever, calling `render` on every tick that decides
/// to render and `should_stop` between ticks to decide whether to return.
/// This is the async sleep-and-tick loop: [`FrameScheduler::tick`] itself stays
/// synchronous and unit-testable; this loop supplies the real sleep.
///
/// Sleeping is done against `tokio::time::sleep`, which respects
/// `tokio::time::pause()`/`advance()` in tests, matching the ambient async
/// runtime choice made for the rest of the workspace.
pub async fn run_scheduler<F, S>(scheduler: &mut FrameScheduler, mut render: F, mut should_stop: S)
where
    F: FnMut(),
    S: FnMut() -> bool,
{
    loop {
        if should_stop() {
            return;
        }
        let now = Instant::now();
        let wait = scheduler.wait_duration(now);
        tokio::time::sleep(wait).await;

        let now = Instant::now();
        match scheduler.tick(now, &mut render) {
            TickOutcome::Rendered { elapsed } => {
                tracing::trace!(?elapsed, "frame rendered");
            }
            TickOutcome::Skipped => {
                tracing::trace!("frame tick skipped, buffer clean");
            }
            TickOutcome::Paused => {
                tracing::trace!("frame tick skipped, scheduler paused");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn run_loop_renders_once_per_marked_dirty_tick() {
        let mut scheduler = FrameScheduler::new(60);
        scheduler.mark_dirty();
        let dirty = scheduler.dirty_handle();
        let renders = Arc::new(AtomicUsize::new(0));
        let renders_clone = renders.clone();
        let ticks = Arc::new(AtomicUsize::new(0));
        let ticks_clone = ticks.clone();

        run_scheduler(
            &mut scheduler,
            move || {
                renders_clone.fetch_add(1, Ordering::SeqCst);
            },
            move || {
                let n = ticks_clone.fetch_add(1, Ordering::SeqCst);
                if n == 0 {
                    dirty.mark();
                }
                n >= 1
            },
        )
        .await;

        assert_eq!(renders.load(Ordering::SeqCst), 1);
    }
}
