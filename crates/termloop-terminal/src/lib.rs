//! Terminal controller: raw mode, alternate screen, cursor and mouse
//! tracking modes, crash recovery, and the strict shutdown sequence that
//! guarantees the terminal is restored on every exit path.

mod controller;
mod mouse;
mod recovery;
mod size;

pub use controller::{emergency_shutdown, InitOptions, TerminalController};
pub use mouse::{disable_all_mouse_sequence, MouseMode};
pub use recovery::RawModeFlag;
pub use size::detect_size;
