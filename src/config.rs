use std::{
    fs,
    path::{Path, PathBuf},
};

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use which::which;

use crate::{NotesError, Result};

/// Directory name used under the platform data and config directories.
const APP_DIR: &str = "brutal-notes";

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

fn default_recent_limit() -> usize {
    5
}

/// Application configuration settings.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Directory holding the stored document collections
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Default editor command
    #[serde(default)]
    pub editor_command: Option<String>,

    /// Where exports go when no output directory is given
    #[serde(default)]
    pub export_dir: Option<PathBuf>,

    /// How many documents the dashboard lists as recent
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            editor_command: None,
            export_dir: None,
            recent_limit: default_recent_limit(),
        }
    }
}

impl Config {
    /// Default location of the configuration file.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.json"))
    }

    /// Loads configuration.
    ///
    /// An explicit path must exist and parse. Without one, the default
    /// location is used when present and built-in defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => {
                    debug!("No configuration file found, using defaults");
                    Ok(Self::default())
                }
            },
        }
    }

    fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|e| NotesError::ConfigError {
            message: format!("cannot read {}: {}", path.display(), e),
        })?;
        let config = serde_json::from_str(&raw).map_err(|e| NotesError::ConfigError {
            message: format!("invalid config {}: {}", path.display(), e),
        })?;

        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Editor command for `save --edit`: the configured one, then `$EDITOR`,
    /// then the first platform editor found on the PATH.
    pub fn get_editor_command(&self) -> String {
        let preferred = self
            .editor_command
            .iter()
            .cloned()
            .chain(std::env::var("EDITOR").ok());
        for command in preferred {
            if editor_available(&command) {
                return command;
            }
            warn!("Editor '{}' not found, trying the next one", command);
        }

        let platform: &[&str] = if cfg!(windows) {
            &["notepad"]
        } else if cfg!(target_os = "macos") {
            &["open -t"]
        } else {
            &["nano", "vim", "vi", "emacs"]
        };
        platform
            .iter()
            .copied()
            .find(|command| editor_available(command))
            .unwrap_or(platform[0])
            .to_string()
    }

    pub fn export_dir(&self) -> PathBuf {
        self.export_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

/// Whether the program an editor command starts with resolves to an executable.
fn editor_available(command: &str) -> bool {
    shell_words::split(command)
        .ok()
        .and_then(|args| args.into_iter().next())
        .is_some_and(|program| which(program).is_ok())
}
