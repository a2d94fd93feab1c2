//! Frame scheduler: a dirty-flag-driven, drift-compensating tick
//! that coalesces multiple state updates into a single render per frame,
//! plus the async loop that drives it against real (or, in tests,
//! `tokio::time::pause`d) wall-clock time.

mod dirty;
mod run;
mod scheduler;
mod stats;

pub use dirty::DirtyFlag;
pub use run::run_scheduler;
pub use scheduler::{clamp_fps, FrameScheduler, TickOutcome, DEFAULT_FPS, MAX_FPS, MIN_FPS};
pub use stats::FrameStats;
