use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Optional configuration loaded from `~/.config/romsum/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RomsumConfig {
    /// Also append log lines to `~/.local/state/romsum/romsum.log`.
    pub log_to_file: bool,
    /// Unix permission bits for newly created output files (e.g. `0o755`).
    /// None = platform default.
    pub output_mode: Option<u32>,
    /// Re-check every region after all corrections are applied and warn
    /// when overlapping regions broke an earlier one.
    pub verify: bool,
}

impl Default for RomsumConfig {
    fn default() -> Self {
        Self {
            log_to_file: false,
            output_mode: None,
            verify: true,
        }
    }
}

/// Default config location. Does not create anything.
pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs =
        xdg::BaseDirectories::with_prefix("romsum").map_err(|e| Error::Config(e.to_string()))?;
    Ok(xdg_dirs.get_config_file("config.toml"))
}

/// Load configuration.
///
/// An explicit `path` must exist. Without one, the default location is used
/// if a file is there, otherwise built-in defaults apply.
pub fn load(path: Option<&Path>) -> Result<RomsumConfig> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => {
            let p = config_path()?;
            if !p.exists() {
                return Ok(RomsumConfig::default());
            }
            p
        }
    };
    let data = fs::read_to_string(&path)
        .map_err(|e| Error::Config(format!("read {}: {}", path.display(), e)))?;
    parse(&data).map_err(|e| match e {
        Error::Config(msg) => Error::Config(format!("{}: {}", path.display(), msg)),
        other => other,
    })
}

pub fn parse(data: &str) -> Result<RomsumConfig> {
    toml::from_str(data).map_err(|e| Error::Config(e.to_string()))
}
