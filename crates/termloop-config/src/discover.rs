use crate::context::apply_context;
use crate::keys::ConfigFile;
use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Parsed, context-clamped configuration plus the path it was (or would
/// have been) loaded from, kept around for diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub file: ConfigFile,
    pub source: Option<PathBuf>,
}

/// Best-effort config path following the discovery order in §6.1: a local
/// `termloop.toml` in the current working directory first, then
/// `$XDG_CONFIG_HOME/termloop/config.toml` via [`dirs::config_dir`].
/// Returns `None` when neither exists — callers fall back to built-in
/// defaults in that case.
pub fn discover() -> Option<PathBuf> {
    let local = PathBuf::from("termloop.toml");
    if local.exists() {
        return Some(local);
    }
    if let Some(dir) = dirs::config_dir() {
        let candidate = dir.join("termloop").join("config.toml");
        if candidate.exists() {
            return Some(candidate);
        }
    }
    None
}

/// Load configuration from `path` if given, else run [`discover`]. A
/// missing file silently yields defaults; a malformed file logs a
/// `tracing::warn!` and also yields defaults rather than failing startup
/// (§6.1: "falls back to defaults rather than failing startup"). The
/// result is always context-clamped via [`apply_context`] before return.
pub fn load(path: Option<PathBuf>) -> Result<Config> {
    let resolved = path.or_else(discover);
    let mut config = match &resolved {
        Some(p) => load_file(p),
        None => Config {
            file: ConfigFile::default(),
            source: None,
        },
    };
    apply_context(&mut config.file);
    Ok(config)
}

fn load_file(path: &Path) -> Config {
    match fs::read_to_string(path) {
        Ok(content) => match toml::from_str::<ConfigFile>(&content) {
            Ok(file) => Config {
                file,
                source: Some(path.to_path_buf()),
            },
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "malformed config file, using defaults");
                Config {
                    file: ConfigFile::default(),
                    source: None,
                }
            }
        },
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "config file unreadable, using defaults");
            Config {
                file: ConfigFile::default(),
                source: None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::{Backend, MouseTracking};

    #[test]
    fn missing_file_yields_defaults() {
        let config = load(Some(PathBuf::from("__does_not_exist__.toml"))).unwrap();
        assert_eq!(config.file, ConfigFile::default());
        assert!(config.source.is_none());
    }

    #[test]
    fn parses_keys_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("termloop.toml");
        fs::write(
            &path,
            "backend = \"raw\"\nfps = 30\nmouse_tracking = \"all\"\n",
        )
        .unwrap();

        let config = load(Some(path.clone())).unwrap();
        assert_eq!(config.file.backend, Backend::Raw);
        assert_eq!(config.file.fps, 30);
        assert_eq!(config.file.mouse_tracking, MouseTracking::All);
        assert_eq!(config.source, Some(path));
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("termloop.toml");
        fs::write(&path, "fps = [this is not valid toml").unwrap();

        let config = load(Some(path)).unwrap();
        assert_eq!(config.file, ConfigFile::default());
        assert!(config.source.is_none());
    }

    #[test]
    fn out_of_range_fps_is_clamped_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("termloop.toml");
        fs::write(&path, "fps = 9000\n").unwrap();

        let config = load(Some(path)).unwrap();
        assert_eq!(config.file.fps, 240);
    }
}
