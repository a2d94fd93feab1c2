use termloop_types::{TermError, MAX_DIM, MIN_DIM};

fn parse_env_dim(value: &str) -> Option<u16> {
    value.trim().parse::<u16>().ok().filter(|n| (MIN_DIM..=MAX_DIM).contains(n))
}

/// Fall back to `LINES`/`COLUMNS` when the tty ioctl is unavailable. Both
/// must parse to `1..=9999`; if either is missing or invalid, this step
/// fails and the caller should surface `SizeDetectionFailed`.
fn from_environment() -> Option<(u16, u16)> {
    let lines = std::env::var("LINES").ok().and_then(|v| parse_env_dim(&v))?;
    let cols = std::env::var("COLUMNS").ok().and_then(|v| parse_env_dim(&v))?;
    Some((lines, cols))
}

/// Detect terminal size: (1) platform ioctl via `crossterm`, (2) `LINES`/
/// `COLUMNS` environment fallback, (3) error.
pub fn detect_size() -> Result<(u16, u16), TermError> {
    if let Ok((cols, rows)) = crossterm::terminal::size() {
        if (MIN_DIM..=MAX_DIM).contains(&rows) && (MIN_DIM..=MAX_DIM).contains(&cols) {
            return Ok((rows, cols));
        }
    }
    if let Some((rows, cols)) = from_environment() {
        tracing::debug!(rows, cols, "size detected from LINES/COLUMNS fallback");
        return Ok((rows, cols));
    }
    Err(TermError::SizeDetectionFailed)
}
