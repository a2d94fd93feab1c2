use crate::action::EventAction;
use std::collections::HashMap;
use termloop_types::{Command, ComponentId, Event};

/// The vtable every component registers: `event_to_msg`, `update`, plus
/// optional `mount`/`unmount`. `view` itself belongs to an external
/// layout/widget collaborator — the core only calls `event_to_msg` and
/// `update`.
pub trait Component<S, M>: Send {
    /// Pure: given the current state, decide what an event means to this
    /// component, without performing I/O or touching globals.
    fn event_to_msg(&self, event: &Event, state: &S) -> EventAction<M>;

    /// Pure: fold a message into a new state plus any commands it wants
    /// to run. No I/O, no globals.
    fn update(&self, msg: M, state: S) -> (S, Vec<Command<M>>);

    /// Called once when the component is registered into the table.
    fn mount(&self, _state: &S) {}

    /// Called once when the component is removed from the table.
    fn unmount(&self, _state: &S) {}
}

struct Entry<S, M> {
    component: Box<dyn Component<S, M>>,
    parent: Option<ComponentId>,
}

/// A single-threaded registry of components keyed by [`ComponentId`],
/// each with an explicit parent link for `Propagate` routing. One event
/// loop dispatches updates in order; there is no per-component OS thread.
#[derive(Default)]
pub struct ComponentTable<S, M> {
    entries: HashMap<ComponentId, Entry<S, M>>,
    order: Vec<ComponentId>,
}

impl<S, M> ComponentTable<S, M> {
    pub fn new() -> Self {
        ComponentTable {
            entries: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Register `component` under `id` with an explicit `parent` (`None`
    /// for the root). Calls the component's `mount` hook immediately.
    pub fn register(
        &mut self,
        id: ComponentId,
        parent: Option<ComponentId>,
        component: Box<dyn Component<S, M>>,
        state: &S,
    ) {
        component.mount(state);
        self.order.push(id);
        self.entries.insert(id, Entry { component, parent });
    }

    pub fn unregister(&mut self, id: ComponentId, state: &S) {
        if let Some(entry) = self.entries.remove(&id) {
            entry.component.unmount(state);
            self.order.retain(|existing| *existing != id);
        }
    }

    pub fn parent_of(&self, id: ComponentId) -> Option<ComponentId> {
        self.entries.get(&id).and_then(|e| e.parent)
    }

    pub fn contains(&self, id: ComponentId) -> bool {
        self.entries.contains_key(&id)
    }

    /// Every registered id, in registration order — the set a broadcast
    /// event (`Resize`/`Focus`/`Tick`) is delivered to.
    pub fn ids(&self) -> impl Iterator<Item = ComponentId> + '_ {
        self.order.iter().copied()
    }

    pub fn update(&self, id: ComponentId, msg: M, state: S) -> Option<(S, Vec<Command<M>>)> {
        self.entries.get(&id).map(|e| e.component.update(msg, state))
    }

    /// Ask `id`'s `event_to_msg`. On [`EventAction::Propagate`], walk to
    /// the parent and ask again, repeating until a component answers with
    /// `Msg`/`Ignore` or there is no further parent (the event is then
    /// dropped).
    pub fn route_event(&self, start: ComponentId, event: &Event, state: &S) -> Option<(ComponentId, M)> {
        let mut current = Some(start);
        while let Some(id) = current {
            let entry = self.entries.get(&id)?;
            match entry.component.event_to_msg(event, state) {
                EventAction::Msg(m) => return Some((id, m)),
                EventAction::Ignore => return None,
                EventAction::Propagate => current = entry.parent,
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, PartialEq, Debug)]
    struct St(u32);

    struct Echo;
    impl Component<St, u32> for Echo {
        fn event_to_msg(&self, _event: &Event, _state: &St) -> EventAction<u32> {
            EventAction::Msg(1)
        }
        fn update(&self, msg: u32, state: St) -> (St, Vec<Command<u32>>) {
            (St(state.0 + msg), vec![])
        }
    }

    struct Propagator;
    impl Component<St, u32> for Propagator {
        fn event_to_msg(&self, _event: &Event, _state: &St) -> EventAction<u32> {
            EventAction::Propagate
        }
        fn update(&self, msg: u32, state: St) -> (St, Vec<Command<u32>>) {
            (St(state.0 + msg), vec![])
        }
    }

    struct Ignorer;
    impl Component<St, u32> for Ignorer {
        fn event_to_msg(&self, _event: &Event, _state: &St) -> EventAction<u32> {
            EventAction::Ignore
        }
        fn update(&self, _msg: u32, state: St) -> (St, Vec<Command<u32>>) {
            (state, vec![])
        }
    }

    #[test]
    fn propagate_walks_to_parent_and_resolves() {
        let mut table: ComponentTable<St, u32> = ComponentTable::new();
        let state = St(0);
        table.register(ComponentId::ROOT, None, Box::new(Echo), &state);
        table.register(ComponentId(1), Some(ComponentId::ROOT), Box::new(Propagator), &state);

        let event = termloop_types::Event::Tick { interval_ms: 16 };
        let resolved = table.route_event(ComponentId(1), &event, &state);
        assert_eq!(resolved, Some((ComponentId::ROOT, 1)));
    }

    #[test]
    fn propagate_past_root_drops_the_event() {
        let mut table: ComponentTable<St, u32> = ComponentTable::new();
        let state = St(0);
        table.register(ComponentId::ROOT, None, Box::new(Propagator), &state);
        let event = termloop_types::Event::Tick { interval_ms: 16 };
        assert_eq!(table.route_event(ComponentId::ROOT, &event, &state), None);
    }

    #[test]
    fn ignore_drops_without_propagating() {
        let mut table: ComponentTable<St, u32> = ComponentTable::new();
        let state = St(0);
        table.register(ComponentId::ROOT, None, Box::new(Echo), &state);
        table.register(ComponentId(1), Some(ComponentId::ROOT), Box::new(Ignorer), &state);
        let event = termloop_types::Event::Tick { interval_ms: 16 };
        assert_eq!(table.route_event(ComponentId(1), &event, &state), None);
    }

    #[test]
    fn unregister_removes_from_id_listing() {
        let mut table: ComponentTable<St, u32> = ComponentTable::new();
        let state = St(0);
        table.register(ComponentId::ROOT, None, Box::new(Echo), &state);
        table.register(ComponentId(1), Some(ComponentId::ROOT), Box::new(Echo), &state);
        table.unregister(ComponentId(1), &state);
        assert_eq!(table.ids().collect::<Vec<_>>(), vec![ComponentId::ROOT]);
    }
}
