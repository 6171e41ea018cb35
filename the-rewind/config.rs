//! Session configuration loaded from TOML.
//!
//! ```toml
//! history-limit = 50
//! ```

use std::{
  fs,
  io,
  path::{
    Path,
    PathBuf,
  },
};

use serde::{
  Deserialize,
  Serialize,
};
use thiserror::Error;

use crate::history::DEFAULT_HISTORY_LIMIT;

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("failed to read config {}: {source}", path.display())]
  Io {
    path:   PathBuf,
    #[source]
    source: io::Error,
  },
  #[error("failed to parse config: {0}")]
  Parse(#[from] toml::de::Error),
  #[error("history-limit must be at least 1")]
  InvalidLimit,
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct SessionConfig {
  /// Maximum number of audit log entries kept by the history.
  pub history_limit: usize,
}

impl Default for SessionConfig {
  fn default() -> Self {
    Self {
      history_limit: DEFAULT_HISTORY_LIMIT,
    }
  }
}

impl SessionConfig {
  pub fn from_toml_str(source: &str) -> Result<Self> {
    let config: Self = toml::from_str(source)?;
    config.validate()
  }

  pub fn load(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    let source = fs::read_to_string(path).map_err(|source| {
      ConfigError::Io {
        path: path.to_path_buf(),
        source,
      }
    })?;
    Self::from_toml_str(&source)
  }

  fn validate(self) -> Result<Self> {
    if self.history_limit == 0 {
      return Err(ConfigError::InvalidLimit);
    }
    Ok(self)
  }
}
