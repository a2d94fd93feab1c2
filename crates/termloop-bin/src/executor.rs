use termloop_events::CommandExecutor;
use termloop_types::{Command, ComponentId};
use tokio::sync::mpsc::UnboundedSender;

/// Runs the two non-`Quit` commands on the tokio runtime and feeds their
/// result back in as a message on `results`, which the main loop enqueues
/// directly onto the dispatcher's queue — the "same queue the dispatcher
/// drains" the library's [`CommandExecutor`] contract asks for.
pub struct TokioExecutor<M> {
    results: UnboundedSender<(ComponentId, M)>,
}

impl<M> TokioExecutor<M> {
    pub fn new(results: UnboundedSender<(ComponentId, M)>) -> Self {
        TokioExecutor { results }
    }
}

impl<M: Send + 'static> CommandExecutor<M> for TokioExecutor<M> {
    fn execute(&mut self, _correlation_id: u64, component: ComponentId, command: Command<M>) {
        match command {
            Command::Quit(_) => {
                tracing::debug!("quit command reached executor, this should not happen");
            }
            Command::After(duration, msg) => {
                let results = self.results.clone();
                tokio::spawn(async move {
                    tokio::time::sleep(duration).await;
                    let _ = results.send((component, msg));
                });
            }
            Command::Task(task) => {
                let results = self.results.clone();
                tokio::task::spawn_blocking(move || {
                    let msg = task();
                    let _ = results.send((component, msg));
                });
            }
        }
    }
}
