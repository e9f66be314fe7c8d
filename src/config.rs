use crate::error::{ExpoBumpError, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Name of the settings file looked up in the current and config directories.
pub const CONFIG_FILE_NAME: &str = "expobump.toml";

/// Settings for one expo-bump invocation.
///
/// Names the single remote and branch a release is made from, and the
/// command that publishes the checked-out release.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Settings {
    #[serde(default = "default_remote")]
    pub remote: String,

    #[serde(default = "default_branch")]
    pub branch: String,

    /// Program followed by its arguments
    #[serde(default = "default_publish_command")]
    pub publish_command: Vec<String>,
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_branch() -> String {
    "master".to_string()
}

fn default_publish_command() -> Vec<String> {
    vec!["exp".to_string(), "publish".to_string()]
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            remote: default_remote(),
            branch: default_branch(),
            publish_command: default_publish_command(),
        }
    }
}

impl Settings {
    /// `<remote>/<branch>`, the remote-tracking ref a revert resets to.
    pub fn remote_branch(&self) -> String {
        format!("{}/{}", self.remote, self.branch)
    }

    fn validate(self) -> Result<Self> {
        if self.publish_command.is_empty() {
            return Err(ExpoBumpError::config("publish_command must not be empty"));
        }
        if self.remote.is_empty() || self.branch.is_empty() {
            return Err(ExpoBumpError::config("remote and branch must not be empty"));
        }
        Ok(self)
    }
}

/// Parses settings from TOML text, filling in defaults for missing keys.
pub fn parse_settings(text: &str) -> Result<Settings> {
    let settings: Settings =
        toml::from_str(text).map_err(|e| ExpoBumpError::config(e.to_string()))?;
    settings.validate()
}

/// Loads settings from file or returns defaults.
///
/// Attempts to load settings in the following order:
/// 1. Custom path provided as parameter
/// 2. `expobump.toml` in current directory
/// 3. `expobump.toml` in the user config directory
/// 4. Default settings if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom settings file
///
/// # Returns
/// * `Ok(Settings)` - Loaded or default settings
/// * `Err` - If a file exists but cannot be read or parsed
pub fn load_settings(config_path: Option<&str>) -> Result<Settings> {
    let local = Path::new(".").join(CONFIG_FILE_NAME);

    let text = if let Some(path) = config_path {
        fs::read_to_string(path)
            .map_err(|e| ExpoBumpError::config(format!("Cannot read {}: {}", path, e)))?
    } else if local.exists() {
        fs::read_to_string(&local)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let path = config_dir.join(CONFIG_FILE_NAME);
        if path.exists() {
            fs::read_to_string(path)?
        } else {
            return Ok(Settings::default());
        }
    } else {
        return Ok(Settings::default());
    };

    parse_settings(&text)
}
