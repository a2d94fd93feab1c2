//! Streaming escape-sequence decoder: converts raw terminal bytes into
//! typed [`Event`](termloop_types::Event)s, tolerant of sequences split
//! across reads, plus an async reader task that drives it from stdin.

mod decoder;
mod mouse;
mod reader;
mod tables;

pub use decoder::Decoder;
pub use reader::{spawn_reader, ReaderShutdown, ESCAPE_FLUSH_MS};
