//! A minimal demo application wired against the runtime crates, standing
//! in for an external widget/layout layer: `view` here writes straight
//! into the [`Grid`] instead of producing a `RenderTree` for a flattener
//! to walk.

use termloop_events::{Component, EventAction};
use termloop_types::{Command, ComponentId, Event, Grid, KeyName, Style};

#[derive(Debug, Clone, PartialEq)]
pub struct DemoState {
    pub counter: i64,
    pub last_key: String,
    pub size: (u16, u16),
}

impl DemoState {
    pub fn new(size: (u16, u16)) -> Self {
        DemoState {
            counter: 0,
            last_key: String::new(),
            size,
        }
    }
}

#[derive(Debug, Clone)]
pub enum DemoMsg {
    Increment,
    Decrement,
    Noted(String),
    Resized(u16, u16),
    RequestQuit,
}

pub struct DemoComponent;

impl Component<DemoState, DemoMsg> for DemoComponent {
    fn event_to_msg(&self, event: &Event, _state: &DemoState) -> EventAction<DemoMsg> {
        match event {
            Event::Key { name: KeyName::Up, .. } => EventAction::Msg(DemoMsg::Increment),
            Event::Key { name: KeyName::Down, .. } => EventAction::Msg(DemoMsg::Decrement),
            Event::Key { char: Some('q'), .. } | Event::Key { name: KeyName::Escape, .. } => {
                EventAction::Msg(DemoMsg::RequestQuit)
            }
            Event::Key { name: KeyName::Char, char: Some(c), .. } => {
                EventAction::Msg(DemoMsg::Noted(c.to_string()))
            }
            Event::Resize { rows, cols } => EventAction::Msg(DemoMsg::Resized(*rows, *cols)),
            _ => EventAction::Ignore,
        }
    }

    fn update(&self, msg: DemoMsg, state: DemoState) -> (DemoState, Vec<Command<DemoMsg>>) {
        match msg {
            DemoMsg::Increment => (
                DemoState {
                    counter: state.counter + 1,
                    ..state
                },
                vec![],
            ),
            DemoMsg::Decrement => (
                DemoState {
                    counter: state.counter - 1,
                    ..state
                },
                vec![],
            ),
            DemoMsg::Noted(key) => (DemoState { last_key: key, ..state }, vec![]),
            DemoMsg::Resized(rows, cols) => (
                DemoState {
                    size: (rows, cols),
                    ..state
                },
                vec![],
            ),
            DemoMsg::RequestQuit => (state, vec![Command::Quit("q pressed".into())]),
        }
    }
}

/// Paint `state` into `grid`. Deliberately tiny — this stands in for a
/// real layout layer, not a feature of the library itself.
pub fn view(state: &DemoState, grid: &mut Grid) {
    grid.clear();
    let style = Style::default();
    let _ = grid.write_str(1, 1, "termloop demo -- arrows to count, q to quit", style);
    let _ = grid.write_str(3, 1, &format!("counter: {}", state.counter), style);
    let _ = grid.write_str(4, 1, &format!("last key: {}", state.last_key), style);
    let _ = grid.write_str(5, 1, &format!("size: {}x{}", state.size.0, state.size.1), style);
}

/// Single-component focus/hit-test providers: everything routes to root.
pub struct RootOnly;

impl termloop_events::FocusProvider for RootOnly {
    fn focused_component(&self) -> Option<ComponentId> {
        Some(ComponentId::ROOT)
    }
}

impl termloop_events::HitTest for RootOnly {
    fn component_at(&self, _x: u16, _y: u16) -> Option<ComponentId> {
        Some(ComponentId::ROOT)
    }
}
