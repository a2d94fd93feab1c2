use std::time::Duration;

/// Handle identifying a registered component. A small integer, per the
/// design note recommending "integer or small-string handle" — an integer
/// is cheaper to compare and route on in the hot dispatch path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(pub u32);

impl ComponentId {
    pub const ROOT: ComponentId = ComponentId(0);
}

/// A declarative side-effect request returned alongside a component's new
/// state from `update`. The core recognizes `Quit` directly; every other
/// variant is forwarded to an external executor.
///
/// `Task` is modeled as a boxed closure rather than a boxed `Future`: the
/// executor that consumes commands decides how to run it (blocking thread,
/// async task, inline), so the command itself only needs to describe "run
/// this and turn the result into a message", not which runtime to do it on.
pub enum Command<M> {
    Quit(String),
    After(Duration, M),
    Task(Box<dyn FnOnce() -> M + Send + 'static>),
}

impl<M> std::fmt::Debug for Command<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Command::Quit(reason) => f.debug_tuple("Quit").field(reason).finish(),
            Command::After(dur, _) => f.debug_tuple("After").field(dur).finish(),
            Command::Task(_) => f.write_str("Task(..)"),
        }
    }
}
