//! `mudz.json` project configuration.

use mudz_common::limits::DEFAULT_LOADER_TIMEOUT_MS;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

pub const CONFIG_FILE_NAME: &str = "mudz.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompletionConfig {
    pub case_sensitive: bool,
    pub max_items: Option<usize>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectConfig {
    /// Directories searched for `#include` and `inherit` targets, relative
    /// to the directory holding `mudz.json`.
    pub include_paths: Vec<PathBuf>,
    pub loader_timeout_ms: u64,
    /// Emit comment tokens when highlighting.
    pub emit_comments: bool,
    pub completion: CompletionConfig,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        ProjectConfig {
            include_paths: Vec::new(),
            loader_timeout_ms: DEFAULT_LOADER_TIMEOUT_MS,
            emit_comments: false,
            completion: CompletionConfig::default(),
        }
    }
}

impl ProjectConfig {
    pub fn from_json(path: &Path, text: &str) -> Result<ProjectConfig, ConfigError> {
        serde_json::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Read `mudz.json` from `dir`. A missing file yields the defaults.
    pub fn load(dir: &Path) -> Result<ProjectConfig, ConfigError> {
        let path = dir.join(CONFIG_FILE_NAME);
        let text = match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no project config, using defaults");
                return Ok(ProjectConfig::default());
            }
            Err(source) => return Err(ConfigError::Io { path, source }),
        };
        let mut config = Self::from_json(&path, &text)?;
        config.include_paths = config
            .include_paths
            .into_iter()
            .map(|p| if p.is_absolute() { p } else { dir.join(p) })
            .collect();
        Ok(config)
    }

    pub fn loader_timeout(&self) -> Duration {
        Duration::from_millis(self.loader_timeout_ms)
    }
}
