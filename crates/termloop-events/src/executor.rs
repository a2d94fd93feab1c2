use termloop_types::{Command, ComponentId};

/// Runs every non-`Quit` command collected from a component's `update`.
/// The core recognizes `Quit` itself and never forwards
/// it here; everything else — `After`, `Task`, and whatever an
/// application-specific `Command` variant adds — is this collaborator's
/// job. `correlation_id` is unique per dispatch so a late result can be
/// matched back to the command that produced it; the executor is
/// responsible for eventually enqueueing that result as a message
/// targeting `component` (typically via the same queue the dispatcher
/// drains), the core does not do this on the executor's behalf.
pub trait CommandExecutor<M> {
    fn execute(&mut self, correlation_id: u64, component: ComponentId, command: Command<M>);
}

/// An executor that discards every command. Useful for tests and for
/// components that never return anything but `Quit`.
#[derive(Debug, Default)]
pub struct NullExecutor;

impl<M> CommandExecutor<M> for NullExecutor {
    fn execute(&mut self, _correlation_id: u64, _component: ComponentId, _command: Command<M>) {}
}

/// Records every command it receives, in order, for tests that need to
/// assert on what the dispatcher forwarded.
#[derive(Default)]
pub struct RecordingExecutor<M> {
    pub received: Vec<(u64, ComponentId, Command<M>)>,
}

impl<M> CommandExecutor<M> for RecordingExecutor<M> {
    fn execute(&mut self, correlation_id: u64, component: ComponentId, command: Command<M>) {
        self.received.push((correlation_id, component, command));
    }
}
