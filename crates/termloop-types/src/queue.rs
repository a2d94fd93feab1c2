use crate::message::ComponentId;
use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use std::sync::atomic::{AtomicU64, Ordering};

/// Default message queue capacity, overridable via configuration
/// (`message_queue_cap`).
pub const DEFAULT_QUEUE_CAP: usize = 1000;

/// FIFO queue of `(component_id, message)` pairs. A bounded
/// `crossbeam_channel`, not a mutex — safe for concurrent enqueue from
/// multiple producers with a single dequeuer (the render loop), and on the
/// hot path per §5: no locks. `try_send` gives the drop-new-on-full
/// overflow semantics; `try_recv` drains without blocking the dequeuer when
/// the queue is empty.
pub struct MessageQueue<M> {
    tx: Sender<(ComponentId, M)>,
    rx: Receiver<(ComponentId, M)>,
    overflow_count: AtomicU64,
}

impl<M> MessageQueue<M> {
    pub fn new(cap: usize) -> Self {
        let (tx, rx) = bounded(cap);
        MessageQueue {
            tx,
            rx,
            overflow_count: AtomicU64::new(0),
        }
    }

    pub fn with_default_cap() -> Self {
        Self::new(DEFAULT_QUEUE_CAP)
    }

    /// Enqueue `(id, msg)`. Returns `false` and counts an overflow if the
    /// queue is already at capacity (or the receiver has been dropped).
    pub fn enqueue(&self, id: ComponentId, msg: M) -> bool {
        match self.tx.try_send((id, msg)) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                self.overflow_count.fetch_add(1, Ordering::Relaxed);
                false
            }
            Err(TrySendError::Disconnected(_)) => false,
        }
    }

    /// Drain every currently queued message into a freshly allocated
    /// vector, preserving enqueue order.
    pub fn drain_all(&self) -> Vec<(ComponentId, M)> {
        self.rx.try_iter().collect()
    }

    pub fn len(&self) -> usize {
        self.rx.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }

    pub fn overflow_count(&self) -> u64 {
        self.overflow_count.load(Ordering::Relaxed)
    }

    pub fn capacity(&self) -> usize {
        self.tx.capacity().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_order_matches_enqueue_order() {
        let q: MessageQueue<u32> = MessageQueue::new(10);
        for i in 0..5 {
            assert!(q.enqueue(ComponentId(0), i));
        }
        assert_eq!(
            q.drain_all(),
            vec![
                (ComponentId(0), 0),
                (ComponentId(0), 1),
                (ComponentId(0), 2),
                (ComponentId(0), 3),
                (ComponentId(0), 4),
            ]
        );
    }

    #[test]
    fn overflow_drops_new_message_and_counts() {
        let q: MessageQueue<u32> = MessageQueue::new(3);
        for i in 0..3 {
            assert!(q.enqueue(ComponentId(0), i));
        }
        assert!(!q.enqueue(ComponentId(0), 99));
        assert_eq!(q.overflow_count(), 1);
        assert_eq!(q.len(), 3);
    }

    #[test]
    fn queue_overflow_1001_into_cap_1000() {
        let q: MessageQueue<u32> = MessageQueue::with_default_cap();
        for i in 0..1001u32 {
            q.enqueue(ComponentId(0), i);
        }
        assert_eq!(q.len(), 1000);
        assert_eq!(q.overflow_count(), 1);
        let drained = q.drain_all();
        assert_eq!(drained.len(), 1000);
        assert_eq!(drained[0].1, 0);
        assert_eq!(drained[999].1, 999);
    }
}
