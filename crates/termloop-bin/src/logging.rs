use std::path::{Path, PathBuf};
use std::sync::Once;
use tracing_appender::non_blocking::WorkerGuard;

/// Configures a file-only `tracing` subscriber (never stdout/stderr — the
/// alternate screen is about to take over both). Returns the worker guard
/// the caller must keep alive for the process lifetime; dropping it early
/// truncates buffered log lines.
pub fn init(log_file: Option<PathBuf>) -> anyhow::Result<WorkerGuard> {
    let path = log_file.unwrap_or_else(|| PathBuf::from("termloop.log"));
    let dir = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .ok_or_else(|| anyhow::anyhow!("log file path has no file name: {}", path.display()))?;

    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(writer)
        .with_ansi(false)
        .try_init();

    Ok(guard)
}

/// Installs a panic hook that runs the terminal controller's shutdown
/// sequence before the default hook prints, so a panic mid-frame never
/// leaves the terminal in alternate-screen/raw/hidden-cursor state.
/// `restore` is expected to be idempotent.
pub fn install_panic_hook(restore: impl Fn() + Send + Sync + 'static) {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let default_panic = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            restore();
            tracing::error!(target: "runtime.panic", %info, "panic");
            default_panic(info);
        }));
    });
}
