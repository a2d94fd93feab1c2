//! Cell grid diffing, cursor movement optimization, and SGR-aware output
//! batching: everything between "the view function produced a grid" and
//! "these bytes went to the TTY".

mod cursor_optimizer;
mod diff;
mod op;
mod sequence_buffer;
mod sgr;
mod writer;

pub use cursor_optimizer::{CursorOptimizer, Move};
pub use diff::diff;
pub use op::Op;
pub use sequence_buffer::{PushOutcome, SequenceBuffer, SequenceBufferStats, DEFAULT_FLUSH_THRESHOLD};
pub use sgr::{encode_full, style_delta};
pub use writer::{text_width, FrameWriter};
