use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a hook or a host startup step.
#[derive(Debug, Error)]
pub enum ModError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path:?}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid embedded json: {0}")]
    EmbeddedJson(#[from] serde_json::Error),
    #[error("failed to parse settings {path:?}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("trader '{0}' is not in the database")]
    UnknownTrader(String),
    #[error("item template '{0}' is not in the catalog")]
    UnknownItem(String),
}

impl ModError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ModError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        ModError::Json {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ModError>;
