use clap::Parser;
use std::path::PathBuf;

/// Command-line overrides for the configuration keys (`--config` selects
/// the file itself; the rest override individual keys after it loads).
#[derive(Parser, Debug)]
#[command(name = "termloop", version, about = "Terminal UI runtime demo")]
pub struct Args {
    /// Overrides config discovery with an explicit file path.
    #[arg(long = "config")]
    pub config: Option<PathBuf>,

    /// Overrides the configured frame scheduler target rate.
    #[arg(long = "fps")]
    pub fps: Option<u32>,

    /// Overrides the configured initial mouse tracking mode.
    #[arg(long = "mouse", value_enum)]
    pub mouse: Option<MouseArg>,

    /// Overrides the tracing file sink path.
    #[arg(long = "log-file")]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum MouseArg {
    None,
    Click,
    Drag,
    All,
}

impl From<MouseArg> for termloop_config::MouseTracking {
    fn from(value: MouseArg) -> Self {
        match value {
            MouseArg::None => termloop_config::MouseTracking::None,
            MouseArg::Click => termloop_config::MouseTracking::Click,
            MouseArg::Drag => termloop_config::MouseTracking::Drag,
            MouseArg::All => termloop_config::MouseTracking::All,
        }
    }
}
