//! Loads `config.json` from an explicit path or the current directory.

use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::model::HostsFile;

pub struct ConfigLoader {
    path: PathBuf,
}

impl ConfigLoader {
    /// Looks for `config.json` next to the current working directory.
    pub fn new() -> Self {
        Self {
            path: PathBuf::from("config.json"),
        }
    }

    pub fn with_path(mut self, path: impl AsRef<Path>) -> Self {
        self.path = path.as_ref().to_path_buf();
        self
    }

    pub fn load(self) -> Result<HostsFile, ConfigError> {
        let raw = std::fs::read_to_string(&self.path).map_err(|source| ConfigError::Read {
            path: self.path.clone(),
            source,
        })?;
        let hosts_file: HostsFile =
            serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
                path: self.path.clone(),
                source,
            })?;

        if hosts_file.master().is_none() {
            return Err(ConfigError::Validation(
                "config.json Hosts[] has no entry with type \"master\"".to_string(),
            ));
        }

        Ok(hosts_file)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
