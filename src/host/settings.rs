use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{ModError, Result};

fn default_bind() -> String { "0.0.0.0:6969".to_string() }
fn default_data_dir() -> PathBuf { PathBuf::from("data") }
fn default_mod_dir() -> PathBuf { PathBuf::from(".") }

/// Host settings from `server.toml`
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Directory holding the mod's `config/` and `res/`
    #[serde(default = "default_mod_dir")]
    pub mod_dir: PathBuf,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            data_dir: default_data_dir(),
            mod_dir: default_mod_dir(),
        }
    }
}

impl ServerSettings {
    /// Parse the settings file; `None` if it does not exist
    pub fn load(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(path).map_err(|e| ModError::io(path, e))?;
        toml::from_str(&contents)
            .map(Some)
            .map_err(|e| ModError::Toml {
                path: path.to_path_buf(),
                source: e,
            })
    }

    /// Parse the settings file, or use defaults if it does not exist
    pub fn load_or_default(path: &Path) -> Result<Self> {
        Ok(Self::load(path)?.unwrap_or_default())
    }
}
