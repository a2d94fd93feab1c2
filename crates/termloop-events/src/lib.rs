//! Event classification, the component table, and the per-frame message
//! dispatch cycle: routing an [`termloop_types::Event`] to the right
//! component(s), turning it into a message via each component's pure
//! `event_to_msg`, and draining/applying the bounded FIFO queue once per
//! frame.

mod action;
mod component;
mod dispatch;
mod executor;
mod routing;

pub use action::EventAction;
pub use component::{Component, ComponentTable};
pub use dispatch::{CycleReport, Dispatcher, MAX_DRAIN_ITERATIONS};
pub use executor::{CommandExecutor, NullExecutor, RecordingExecutor};
pub use routing::{classify, FocusProvider, HitTest, Routing};
