use crate::mouse::{disable_all_mouse_sequence, MouseMode};
use crate::recovery::RawModeFlag;
use crate::size::detect_size;
use std::io::Write;
use termloop_types::TermError;

/// Options accepted by [`TerminalController::init`].
#[derive(Debug, Clone)]
pub struct InitOptions {
    pub alternate_screen: bool,
    pub hide_cursor: bool,
    pub mouse_tracking: Option<MouseMode>,
    pub explicit_size: Option<(u16, u16)>,
}

impl Default for InitOptions {
    fn default() -> Self {
        InitOptions {
            alternate_screen: true,
            hide_cursor: true,
            mouse_tracking: None,
            explicit_size: None,
        }
    }
}

/// Owns the raw-mode TTY session: entering/leaving the alternate screen,
/// cursor visibility, mouse tracking, and guaranteed restoration on every
/// exit path. Resize callbacks are invoked from [`handle_resize_signal`]
/// (the signal itself is wired up by the runtime binary, which is the only
/// place that knows about the process's signal handling strategy).
pub struct TerminalController {
    entered_raw: bool,
    entered_alt_screen: bool,
    cursor_hidden: bool,
    mouse_mode: Option<MouseMode>,
    cached_size: (u16, u16),
    raw_flag: RawModeFlag,
    resize_callbacks: Vec<Box<dyn FnMut(u16, u16) + Send>>,
}

impl TerminalController {
    /// Acquire raw mode, enter the alternate screen, hide the cursor and
    /// optionally enable mouse tracking, per `opts`. If a previous run's
    /// raw-mode flag is still set (crash recovery), the defensive cleanup
    /// sequence is emitted first.
    pub fn init(opts: InitOptions) -> Result<Self, TermError> {
        let raw_flag = RawModeFlag::new();
        if raw_flag.is_set() {
            tracing::warn!("raw-mode flag set on startup; running crash recovery cleanup");
            run_crash_recovery_cleanup();
        }

        crossterm::terminal::enable_raw_mode().map_err(|_| TermError::TerminalUnavailable)?;
        raw_flag.set();

        let mut controller = TerminalController {
            entered_raw: true,
            entered_alt_screen: false,
            cursor_hidden: false,
            mouse_mode: None,
            cached_size: opts.explicit_size.map(Ok).unwrap_or_else(detect_size)?,
            raw_flag,
            resize_callbacks: Vec::new(),
        };

        if opts.alternate_screen {
            controller.enter_alt_screen();
        }
        if opts.hide_cursor {
            controller.hide_cursor();
        }
        if let Some(mode) = opts.mouse_tracking {
            controller.enable_mouse(mode);
        }

        Ok(controller)
    }

    fn enter_alt_screen(&mut self) {
        if write_raw("\x1b[?1049h").is_ok() {
            self.entered_alt_screen = true;
        } else {
            tracing::warn!("failed to enter alternate screen");
        }
    }

    fn hide_cursor(&mut self) {
        if write_raw("\x1b[?25l").is_ok() {
            self.cursor_hidden = true;
        } else {
            tracing::warn!("failed to hide cursor");
        }
    }

    pub fn enable_mouse(&mut self, mode: MouseMode) {
        if write_raw(&mode.enable_sequence()).is_ok() {
            self.mouse_mode = Some(mode);
        } else {
            tracing::warn!(?mode, "failed to enable mouse tracking");
        }
    }

    pub fn disable_mouse(&mut self) {
        if let Some(mode) = self.mouse_mode {
            let _ = write_raw(&mode.disable_sequence());
            let _ = write_raw("\x1b[?1006l");
        }
        self.mouse_mode = None;
    }

    pub fn size(&self) -> (u16, u16) {
        self.cached_size
    }

    pub fn refresh_size(&mut self) -> Result<(u16, u16), TermError> {
        let size = detect_size()?;
        self.cached_size = size;
        Ok(size)
    }

    pub fn on_resize(&mut self, callback: impl FnMut(u16, u16) + Send + 'static) {
        self.resize_callbacks.push(Box::new(callback));
    }

    /// Re-query size and broadcast to every registered resize callback.
    /// Called when the process receives the platform's terminal-resize
    /// signal. Logged rather than propagated if re-detection fails, since
    /// the previous cached size is still usable.
    pub fn handle_resize_signal(&mut self) {
        match self.refresh_size() {
            Ok((rows, cols)) => {
                for cb in self.resize_callbacks.iter_mut() {
                    cb(rows, cols);
                }
            }
            Err(err) => {
                tracing::warn!(%err, "resize signal handling failed to re-detect size");
            }
        }
    }

    /// Restore the terminal to its pre-init state. Each step is
    /// independently guarded: a failure is logged and the remaining steps
    /// still run. Calling this more than once is a no-op after the first
    /// call (idempotent).
    pub fn shutdown(&mut self) {
        if !self.entered_raw {
            return;
        }

        let _ = write_raw(&disable_all_mouse_sequence());
        self.mouse_mode = None;

        let _ = write_raw("\x1b[?25h");
        self.cursor_hidden = false;

        let _ = write_raw("\x1b[0m");

        if self.entered_alt_screen {
            let _ = write_raw("\x1b[?1049l");
            self.entered_alt_screen = false;
        }

        if let Err(err) = crossterm::terminal::disable_raw_mode() {
            tracing::warn!(%err, "failed to restore cooked terminal mode");
        }
        self.entered_raw = false;

        self.raw_flag.clear();
    }
}

impl Drop for TerminalController {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn write_raw(seq: &str) -> std::io::Result<()> {
    let mut out = std::io::stdout();
    out.write_all(seq.as_bytes())?;
    out.flush()
}

fn run_crash_recovery_cleanup() {
    let _ = write_raw(&disable_all_mouse_sequence());
    let _ = write_raw("\x1b[?25h");
    let _ = write_raw("\x1b[?1049l");
    let _ = write_raw("\x1bc");
}

/// Defensive restoration callable without a live [`TerminalController`]
/// instance, for a panic hook installed before `init` has produced one.
/// Runs the same sequence [`run_crash_recovery_cleanup`] does plus leaving
/// raw mode, and never panics itself.
pub fn emergency_shutdown() {
    run_crash_recovery_cleanup();
    let _ = crossterm::terminal::disable_raw_mode();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_opts_enable_alt_screen_and_hidden_cursor() {
        let opts = InitOptions::default();
        assert!(opts.alternate_screen);
        assert!(opts.hide_cursor);
        assert!(opts.mouse_tracking.is_none());
    }
}
