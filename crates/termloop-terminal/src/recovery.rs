use std::path::{Path, PathBuf};

/// A process-wide "raw mode is currently active" flag, persisted as a
/// well-known file so a *subsequent* process launch can tell that the
/// previous run crashed mid-session and left the terminal in a bad state.
///
/// This is the filesystem marker the design notes call for in place of a
/// global mutable flag: one typed handle, one file, checked once at
/// startup and cleared exactly once on clean shutdown.
pub struct RawModeFlag {
    path: PathBuf,
}

fn default_flag_path() -> PathBuf {
    let dir = dirs::runtime_dir()
        .or_else(dirs::cache_dir)
        .unwrap_or_else(std::env::temp_dir);
    dir.join("termloop-raw-mode.flag")
}

impl RawModeFlag {
    pub fn new() -> Self {
        RawModeFlag {
            path: default_flag_path(),
        }
    }

    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        RawModeFlag { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_set(&self) -> bool {
        self.path.exists()
    }

    /// Mark raw mode as active. Logged but not fatal if the write fails —
    /// crash recovery is best-effort.
    pub fn set(&self) {
        if let Err(err) = std::fs::write(&self.path, b"") {
            tracing::warn!(error = %err, path = %self.path.display(), "failed to persist raw-mode flag");
        }
    }

    /// Clear the flag on clean shutdown. Idempotent: removing an
    /// already-absent file is not an error.
    pub fn clear(&self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => {
                tracing::warn!(error = %err, path = %self.path.display(), "failed to clear raw-mode flag");
            }
        }
    }
}

impl Default for RawModeFlag {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn set_then_is_set_then_clear() {
        let dir = tempdir().unwrap();
        let flag = RawModeFlag::at_path(dir.path().join("flag"));
        assert!(!flag.is_set());
        flag.set();
        assert!(flag.is_set());
        flag.clear();
        assert!(!flag.is_set());
    }

    #[test]
    fn clear_is_idempotent() {
        let dir = tempdir().unwrap();
        let flag = RawModeFlag::at_path(dir.path().join("flag"));
        flag.clear();
        flag.clear();
        assert!(!flag.is_set());
    }
}
