//! Run configuration loaded from ~/.animparse/config.yaml.

use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Settings for the command line host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// `tracing` filter directive, e.g. `info` or `animparse=debug`.
    #[serde(default = "RunConfig::default_log_level")]
    pub log_level: String,
    /// Distance one `shift` moves an object.
    #[serde(default = "RunConfig::default_shift_step")]
    pub shift_step: f32,
    /// Stop after this many atomic commands. None = run to the end.
    #[serde(default)]
    pub command_limit: Option<usize>,
}

impl RunConfig {
    /// Load config from the standard path.
    /// Returns None if the file doesn't exist or can't be parsed.
    pub fn load() -> Option<Self> {
        let content = std::fs::read_to_string(default_config_path()?).ok()?;
        serde_yaml::from_str(&content).ok()
    }

    pub fn load_from(path: &Path) -> Result<Self, io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_yaml::from_str(&content).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    fn default_log_level() -> String {
        "info".to_string()
    }

    fn default_shift_step() -> f32 {
        10.0
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            log_level: Self::default_log_level(),
            shift_step: Self::default_shift_step(),
            command_limit: None,
        }
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    Some(dirs::home_dir()?.join(".animparse").join("config.yaml"))
}
