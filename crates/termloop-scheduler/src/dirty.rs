use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A single-consumer, multi-producer dirty flag: any thread may call
/// [`DirtyFlag::mark`] without locking, and the scheduler atomically
/// checks-and-clears it once per tick via [`DirtyFlag::take`]. Cloning
/// shares the same underlying flag (it's an `Arc` handle), so the view
/// function's thread and the frame scheduler's thread never need a mutex
/// between them — keeping the hot path lock-free.
#[derive(Clone, Default)]
pub struct DirtyFlag(Arc<AtomicBool>);

impl DirtyFlag {
    pub fn new() -> Self {
        DirtyFlag(Arc::new(AtomicBool::new(false)))
    }

    /// Mark the next tick as needing a render. Safe to call from any
    /// thread, any number of times before the next tick observes it.
    pub fn mark(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Check whether a render is due, clearing the flag atomically so a
    /// `mark()` racing with this call is never lost and never double-counted.
    pub fn take(&self) -> bool {
        self.0.swap(false, Ordering::AcqRel)
    }

    pub fn is_dirty(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_clears_the_flag() {
        let flag = DirtyFlag::new();
        flag.mark();
        assert!(flag.take());
        assert!(!flag.take());
    }

    #[test]
    fn clone_shares_the_same_flag() {
        let a = DirtyFlag::new();
        let b = a.clone();
        b.mark();
        assert!(a.take());
    }

    #[test]
    fn repeated_marks_coalesce_into_a_single_pending_render() {
        let flag = DirtyFlag::new();
        for _ in 0..100 {
            flag.mark();
        }
        assert!(flag.take());
        assert!(!flag.take());
    }
}
