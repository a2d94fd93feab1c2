use termloop_types::{ComponentId, Event};

/// Collaborator interface: which component currently holds keyboard focus
/// (§6 "Focus provider"). Out of core scope; the core only consumes it.
pub trait FocusProvider {
    fn focused_component(&self) -> Option<ComponentId>;
}

/// Collaborator interface: which component occupies a screen coordinate
/// (§6 "Hit-test"), backed by the spatial index the core does not own.
pub trait HitTest {
    fn component_at(&self, x: u16, y: u16) -> Option<ComponentId>;
}

/// Where an incoming event should be delivered, per §4.7's classification
/// table: `Key`/`Paste` go to the focused component, `Mouse` to whatever's
/// under the cursor (falling back to root if nothing is), and
/// `Resize`/`Focus`/`Tick` broadcast to every registered component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Routing {
    Single(ComponentId),
    Broadcast,
}

/// Classify `event` into a [`Routing`] decision using the focus and
/// hit-test collaborators. Broadcasting itself (enumerating "every
/// registered component") is the caller's job, since only the component
/// table knows the current registration set.
pub fn classify(event: &Event, focus: &dyn FocusProvider, hit: &dyn HitTest) -> Routing {
    match event {
        Event::Key { .. } | Event::Paste { .. } => {
            Routing::Single(focus.focused_component().unwrap_or(ComponentId::ROOT))
        }
        Event::Mouse { x, y, .. } => {
            Routing::Single(hit.component_at(*x, *y).unwrap_or(ComponentId::ROOT))
        }
        Event::Resize { .. } | Event::Focus { .. } | Event::Tick { .. } => Routing::Broadcast,
    }
}
