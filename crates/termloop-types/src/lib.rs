//! Shared data model for the terminal UI runtime: colors, styles, cells,
//! the double-buffered grid, writer-observable state, events, messages,
//! commands, and the bounded message queue. Every other crate in the
//! workspace builds on these types rather than rolling its own.

mod attribute;
mod cell;
mod color;
mod error;
mod event;
mod grid;
mod message;
mod queue;
mod style;
mod writer_state;

pub use attribute::{sgr_on_codes, Attribute, AttributeSet};
pub use cell::Cell;
pub use color::{Color, NamedColor};
pub use error::TermError;
pub use event::{Event, KeyName, Modifiers, MouseAction, MouseButton};
pub use grid::{BufferPair, Grid, MAX_DIM, MIN_DIM};
pub use message::{Command, ComponentId};
pub use queue::{MessageQueue, DEFAULT_QUEUE_CAP};
pub use style::Style;
pub use writer_state::{CursorState, StyleState, WriterState};
