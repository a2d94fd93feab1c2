use crate::component::ComponentTable;
use crate::executor::CommandExecutor;
use crate::routing::{classify, FocusProvider, HitTest, Routing};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use termloop_types::{Command, ComponentId, Event, MessageQueue, DEFAULT_QUEUE_CAP};

/// Bounded number of drain/apply iterations per frame before any
/// remaining messages roll over to the next frame — a livelock guard.
pub const MAX_DRAIN_ITERATIONS: usize = 64;

/// What happened during one call to [`Dispatcher::run_cycle`].
#[derive(Debug, Default)]
pub struct CycleReport {
    pub applied: usize,
    pub rolled_over: usize,
    pub state_changed: bool,
    pub quit_reason: Option<String>,
}

/// Owns the component table and the bounded FIFO message queue, and runs
/// the per-frame update cycle. This is the only piece of the runtime that
/// calls into application-provided `update`/`event_to_msg` functions.
pub struct Dispatcher<S, M> {
    table: ComponentTable<S, M>,
    queue: MessageQueue<M>,
    shutting_down: AtomicBool,
    next_correlation: AtomicU64,
}

impl<S, M> Dispatcher<S, M> {
    pub fn new(cap: usize) -> Self {
        Dispatcher {
            table: ComponentTable::new(),
            queue: MessageQueue::new(cap),
            shutting_down: AtomicBool::new(false),
            next_correlation: AtomicU64::new(0),
        }
    }

    pub fn with_default_cap() -> Self {
        Self::new(DEFAULT_QUEUE_CAP)
    }

    pub fn table(&self) -> &ComponentTable<S, M> {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut ComponentTable<S, M> {
        &mut self.table
    }

    pub fn overflow_count(&self) -> u64 {
        self.queue.overflow_count()
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_shutting_down(&self) -> bool {
        self.shutting_down.load(Ordering::Acquire)
    }

    /// Enqueue a message directly, bypassing event routing — the
    /// mechanism a [`CommandExecutor`] uses to feed a command's result
    /// back in as a message targeting the component that issued it, per
    /// its own contract.
    pub fn enqueue(&self, component: ComponentId, msg: M) -> bool {
        self.queue.enqueue(component, msg)
    }

    /// Request shutdown directly (e.g. from a signal handler), without
    /// going through a component's `Quit` command. Freezes new event
    /// ingestion; the in-flight cycle still completes.
    pub fn request_shutdown(&self) {
        self.shutting_down.store(true, Ordering::Release);
    }

    /// Classify `event` via the routing table and enqueue the resulting
    /// message, if any. Dropped entirely once shutdown has been
    /// requested, freezing new event ingestion.
    pub fn dispatch_event(&self, event: Event, focus: &dyn FocusProvider, hit: &dyn HitTest, state: &S) {
        if self.is_shutting_down() {
            tracing::trace!("event dropped, shutdown in progress");
            return;
        }
        match classify(&event, focus, hit) {
            Routing::Single(id) => self.route_and_enqueue(id, &event, state),
            Routing::Broadcast => {
                for id in self.table.ids().collect::<Vec<_>>() {
                    self.route_and_enqueue(id, &event, state);
                }
            }
        }
    }

    fn route_and_enqueue(&self, start: ComponentId, event: &Event, state: &S) {
        if let Some((resolved, msg)) = self.table.route_event(start, event, state) {
            if !self.queue.enqueue(resolved, msg) {
                tracing::debug!(?resolved, "message queue overflowed, message dropped");
            }
        }
    }

    /// Run one frame's update cycle: drain the queue, apply each message
    /// through its component's `update`, forward non-`Quit` commands to
    /// `executor`, and repeat for messages enqueued mid-cycle up to
    /// [`MAX_DRAIN_ITERATIONS`]. Any message still queued after the bound
    /// rolls over to the next frame's cycle untouched.
    pub fn run_cycle(&mut self, mut state: S, executor: &mut dyn CommandExecutor<M>) -> (S, CycleReport)
    where
        S: Clone + PartialEq,
    {
        let mut report = CycleReport::default();
        'outer: for _ in 0..MAX_DRAIN_ITERATIONS {
            let batch = self.queue.drain_all();
            if batch.is_empty() {
                break;
            }
            for (id, msg) in batch {
                report.applied += 1;
                let before = state.clone();
                match self.table.update(id, msg, state.clone()) {
                    Some((new_state, commands)) => {
                        if new_state != before {
                            report.state_changed = true;
                        }
                        state = new_state;
                        for cmd in commands {
                            self.handle_command(id, cmd, executor, &mut report);
                        }
                    }
                    None => {
                        tracing::debug!(?id, "message routed to an unregistered component");
                        state = before;
                    }
                }
            }
            if report.quit_reason.is_some() {
                break 'outer;
            }
        }
        report.rolled_over = self.queue.len();
        (state, report)
    }

    fn handle_command(
        &mut self,
        component: ComponentId,
        command: Command<M>,
        executor: &mut dyn CommandExecutor<M>,
        report: &mut CycleReport,
    ) {
        match command {
            Command::Quit(reason) => {
                self.shutting_down.store(true, Ordering::Release);
                if report.quit_reason.is_none() {
                    report.quit_reason = Some(reason);
                }
            }
            other => {
                let correlation_id = self.next_correlation.fetch_add(1, Ordering::Relaxed);
                executor.execute(correlation_id, component, other);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::EventAction;
    use crate::component::Component;
    use crate::executor::{NullExecutor, RecordingExecutor};
    use termloop_types::KeyName;
    use termloop_types::Modifiers;

    #[derive(Clone, PartialEq, Debug)]
    struct St(u32);

    #[derive(Debug)]
    enum Msg {
        Inc,
        Quit,
    }

    struct Counter;
    impl Component<St, Msg> for Counter {
        fn event_to_msg(&self, event: &Event, _state: &St) -> EventAction<Msg> {
            match event {
                Event::Key { .. } => EventAction::Msg(Msg::Inc),
                _ => EventAction::Ignore,
            }
        }
        fn update(&self, msg: Msg, state: St) -> (St, Vec<Command<Msg>>) {
            match msg {
                Msg::Inc => (St(state.0 + 1), vec![]),
                Msg::Quit => (state, vec![Command::Quit("requested".into())]),
            }
        }
    }

    struct NoFocus;
    impl FocusProvider for NoFocus {
        fn focused_component(&self) -> Option<ComponentId> {
            Some(ComponentId::ROOT)
        }
    }
    struct NoHit;
    impl HitTest for NoHit {
        fn component_at(&self, _x: u16, _y: u16) -> Option<ComponentId> {
            None
        }
    }

    #[test]
    fn dispatch_then_cycle_increments_state() {
        let mut dispatcher: Dispatcher<St, Msg> = Dispatcher::with_default_cap();
        let state = St(0);
        dispatcher.table_mut().register(ComponentId::ROOT, None, Box::new(Counter), &state);

        let key = Event::key(KeyName::Enter, None, Modifiers::empty());
        dispatcher.dispatch_event(key, &NoFocus, &NoHit, &state);

        let mut executor = NullExecutor;
        let (state, report) = dispatcher.run_cycle(state, &mut executor);
        assert_eq!(state.0, 1);
        assert_eq!(report.applied, 1);
        assert!(report.state_changed);
    }

    #[test]
    fn quit_command_sets_shutdown_and_is_never_forwarded() {
        let mut dispatcher: Dispatcher<St, Msg> = Dispatcher::with_default_cap();
        let state = St(0);
        dispatcher.table_mut().register(ComponentId::ROOT, None, Box::new(Counter), &state);
        assert!(!dispatcher.is_shutting_down());
        assert!(dispatcher.enqueue(ComponentId::ROOT, Msg::Quit));

        let mut executor = RecordingExecutor::default();
        let (_state, report) = dispatcher.run_cycle(state, &mut executor);
        assert!(executor.received.is_empty());
        assert_eq!(report.quit_reason.as_deref(), Some("requested"));
        assert!(dispatcher.is_shutting_down());
    }

    #[test]
    fn shutdown_freezes_new_event_ingestion() {
        let dispatcher: Dispatcher<St, Msg> = Dispatcher::with_default_cap();
        let state = St(0);
        dispatcher.request_shutdown();
        let key = Event::key(KeyName::Enter, None, Modifiers::empty());
        dispatcher.dispatch_event(key, &NoFocus, &NoHit, &state);
        assert_eq!(dispatcher.queue_len(), 0);
    }

    #[test]
    fn unregistered_component_leaves_state_unchanged() {
        let mut dispatcher: Dispatcher<St, Msg> = Dispatcher::with_default_cap();
        let state = St(5);
        dispatcher.table_mut().register(ComponentId::ROOT, None, Box::new(Counter), &state);
        assert!(dispatcher.enqueue(ComponentId(99), Msg::Inc));

        let mut executor = NullExecutor;
        let (state, report) = dispatcher.run_cycle(state, &mut executor);
        assert_eq!(state.0, 5);
        assert!(!report.state_changed);
    }
}
