use thiserror::Error;

/// Named error kinds surfaced by the runtime's core components.
///
/// Most are recovered locally per their documented propagation policy;
/// only `TerminalUnavailable` and `SizeDetectionFailed` are fatal at init.
#[derive(Debug, Error)]
pub enum TermError {
    #[error("no tty available or raw mode could not be entered")]
    TerminalUnavailable,

    #[error("terminal size could not be determined")]
    SizeDetectionFailed,

    #[error("write to cell ({row}, {col}) is out of bounds for a {rows}x{cols} grid")]
    OutOfBounds {
        row: u16,
        col: u16,
        rows: u16,
        cols: u16,
    },

    #[error("tty write failed: {0}")]
    IoWriteFailed(#[source] std::io::Error),

    #[error("input decode failed on byte pattern: {0:02x?}")]
    InputDecodeFailed(Vec<u8>),

    #[error("message queue overflowed, message dropped")]
    QueueOverflow,

    #[error("command failed: {0}")]
    CommandFailed(String),
}
