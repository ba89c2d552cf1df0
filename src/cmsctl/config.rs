//! Session and settings configuration.
//!
//! Both configs live as pretty-printed JSON under the per-user config
//! directory and are loaded once at command start, then threaded explicitly
//! through the command handlers. Mutating commands (`login`, `use`, `set`)
//! persist back to the same file.

use crate::error::{CmsError, Result};
use crate::fsutil;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const SESSION_FILENAME: &str = "session.json";
const SETTINGS_FILENAME: &str = "settings.json";

/// Env var overriding the config directory, mainly for tests.
pub const CONFIG_DIR_ENV: &str = "CMSCTL_CONFIG_DIR";

/// Resolves the per-user config directory.
pub fn config_dir() -> Result<PathBuf> {
    if let Ok(dir) = env::var(CONFIG_DIR_ENV) {
        if !dir.is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }

    let dirs = ProjectDirs::from("com", "cmsctl", "cmsctl").ok_or_else(|| {
        CmsError::Configuration("Could not determine the user config directory".to_string())
    })?;

    Ok(dirs.config_dir().to_path_buf())
}

/// The persisted session: which server we talk to, as whom, and which
/// project/environment is selected. Stored in `session.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
}

impl SessionConfig {
    /// Loads the session from the config directory. A missing, empty or
    /// corrupt file reads as a blank session.
    pub fn load(config_dir: &Path) -> Self {
        let path = config_dir.join(SESSION_FILENAME);
        let Ok(content) = fs::read_to_string(&path) else {
            return Self::default();
        };
        serde_json::from_str(&content).unwrap_or_default()
    }

    /// Persists the session, creating the config directory if needed.
    pub fn save(&self, config_dir: &Path) -> Result<()> {
        fsutil::make_directory(config_dir)?;
        let value = serde_json::to_value(self)?;
        fsutil::write(value, config_dir.join(SESSION_FILENAME))
    }

    /// Precondition: the user has logged in. Returns host and token.
    pub fn require_login(&self) -> Result<(&str, &str)> {
        match (self.host.as_deref(), self.token.as_deref()) {
            (Some(host), Some(token)) if !host.is_empty() && !token.is_empty() => {
                Ok((host, token))
            }
            _ => Err(CmsError::Configuration(
                "Not logged in. Please use \"cmsctl login\" first".to_string(),
            )),
        }
    }

    /// Precondition: a project and environment are selected.
    pub fn require_location(&self) -> Result<(&str, &str)> {
        match (self.project.as_deref(), self.environment.as_deref()) {
            (Some(project), Some(environment))
                if !project.is_empty() && !environment.is_empty() =>
            {
                Ok((project, environment))
            }
            _ => Err(CmsError::Configuration(
                "Project and environment not set. Please use \"cmsctl use\" first".to_string(),
            )),
        }
    }
}

/// Arbitrary key/value settings (e.g. `editor`), stored in `settings.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Settings {
    values: BTreeMap<String, String>,
}

impl Settings {
    /// Loads settings from the config directory; missing or corrupt files
    /// read as empty settings.
    pub fn load(config_dir: &Path) -> Self {
        let path = config_dir.join(SETTINGS_FILENAME);
        let Ok(content) = fs::read_to_string(&path) else {
            return Self::default();
        };
        serde_json::from_str(&content).unwrap_or_default()
    }

    /// Persists the settings, creating the config directory if needed.
    pub fn save(&self, config_dir: &Path) -> Result<()> {
        fsutil::make_directory(config_dir)?;
        let value = serde_json::to_value(self)?;
        fsutil::write(value, config_dir.join(SETTINGS_FILENAME))
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn set(&mut self, name: &str, value: &str) {
        self.values.insert(name.to_string(), value.to_string());
    }
}
