//! Settings file
//!
//! Optional JSON file given with `--config`. Missing fields take their
//! defaults; command line flags win over the file.

use std::path::{Path, PathBuf};

use glprobe_render::ContextConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cli::Cli;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("could not read settings file {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings in {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub context: ContextConfig,
    /// Group extensions by vendor prefix.
    pub verbose_extensions: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            context: ContextConfig::default(),
            verbose_extensions: true,
        }
    }
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let text = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_owned(),
            source,
        })?;
        let settings = serde_json::from_str(&text).map_err(|source| SettingsError::Parse {
            path: path.to_owned(),
            source,
        })?;
        tracing::debug!(path = %path.display(), ?settings, "loaded settings");
        Ok(settings)
    }

    /// Settings for this invocation: the file named by `--config` (or the
    /// defaults) with command line overrides applied.
    pub fn resolve(cli: &Cli) -> Result<Self, SettingsError> {
        let mut settings = match &cli.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        if cli.compact {
            settings.verbose_extensions = false;
        }
        Ok(settings)
    }
}
