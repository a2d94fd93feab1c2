//! Configuration loading for the terminal UI runtime (§6.1): the
//! recognized keys table, discovery order, and the startup clamp pass.
//! This crate never touches a terminal or the other runtime crates — it
//! is a leaf, consumed only by `termloop-bin`.

mod context;
mod discover;
mod keys;

pub use context::{apply_context, MAX_FPS, MIN_FPS};
pub use discover::{discover, load, Config};
pub use keys::{Backend, CharacterSet, ConfigFile, MouseTracking};
