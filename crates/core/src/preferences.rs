//! Locally persisted settings: tool path, helper binary and download directory.
//!
//! Settings live as one JSON value under [`SETTINGS_KEY`] in the preferences
//! store. Loading never fails: a missing, unreadable or malformed store falls
//! back to the defaults.

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::{DEFAULT_TOOL_PATH, SETTINGS_KEY};
use crate::error::Error::InvalidPath;
use crate::error::{Error, Result};
use crate::file_handling::{read_preferences_store, write_preferences_store};

/// Characters rejected in configured paths.
const INVALID_PATH_CHARACTERS: [char; 6] = ['<', '>', '"', '|', '?', '*'];

fn default_tool_path() -> String {
    DEFAULT_TOOL_PATH.to_string()
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LocalSettings {
    #[serde(rename = "ytdlpPath", default = "default_tool_path")]
    pub tool_path: String,
    #[serde(
        rename = "ffmpegPath",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub helper_binary_path: Option<String>,
    #[serde(
        rename = "downloadPath",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub download_directory: Option<String>,
}

impl Default for LocalSettings {
    fn default() -> Self {
        Self {
            tool_path: default_tool_path(),
            helper_binary_path: None,
            download_directory: None,
        }
    }
}

impl LocalSettings {
    /// Trims every field; a blank tool path becomes the default, blank optional paths are unset.
    #[must_use]
    pub fn normalized(&self) -> Self {
        let tool_path = self.tool_path.trim();

        Self {
            tool_path: if tool_path.is_empty() {
                default_tool_path()
            } else {
                tool_path.to_string()
            },
            helper_binary_path: normalize_optional(self.helper_binary_path.as_deref()),
            download_directory: normalize_optional(self.download_directory.as_deref()),
        }
    }

    /// # Errors
    ///
    /// Returns [`InvalidPath`] for the first path containing a rejected character.
    pub fn validate(&self) -> Result<()> {
        validate_path("Tool path", Some(&self.tool_path))?;
        validate_path("Helper binary path", self.helper_binary_path.as_deref())?;
        validate_path("Download directory", self.download_directory.as_deref())
    }
}

fn normalize_optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(ToString::to_string)
}

fn validate_path(field: &str, path: Option<&str>) -> Result<()> {
    match path {
        Some(path) if path.contains(INVALID_PATH_CHARACTERS) => {
            Err(InvalidPath(field.to_string(), path.to_string()))
        }
        _ => Ok(()),
    }
}

/// Reads the settings from the preferences file at `path`, falling back to defaults.
#[must_use]
pub fn load_settings(path: &str) -> LocalSettings {
    let store = match read_preferences_store(path) {
        Ok(Some(store)) => store,
        Ok(None) => {
            debug!("No preferences at `{path}`, using defaults");
            return LocalSettings::default();
        }
        Err(e) => {
            warn!("Ignoring unreadable preferences: {e}");
            return LocalSettings::default();
        }
    };

    let Some(value) = store.get(SETTINGS_KEY) else {
        return LocalSettings::default();
    };

    match serde_json::from_value::<LocalSettings>(value.clone()) {
        Ok(settings) => settings.normalized(),
        Err(e) => {
            warn!("Ignoring malformed `{SETTINGS_KEY}` in `{path}`: {e}");
            LocalSettings::default()
        }
    }
}

/// Normalizes, validates and stores `settings`, keeping other keys in the file.
///
/// Returns the settings as stored.
///
/// # Errors
///
/// Returns an error if a path is invalid or the file cannot be written.
pub fn save_settings(path: &str, settings: &LocalSettings) -> Result<LocalSettings> {
    let settings = settings.normalized();
    settings.validate()?;

    store_settings(path, &settings)?;

    Ok(settings)
}

/// Replaces the stored settings with the defaults.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn reset_settings(path: &str) -> Result<LocalSettings> {
    let settings = LocalSettings::default();
    store_settings(path, &settings)?;
    Ok(settings)
}

fn store_settings(path: &str, settings: &LocalSettings) -> Result<()> {
    let mut store = match read_preferences_store(path) {
        Ok(store) => store.unwrap_or_default(),
        Err(e) => {
            warn!("Replacing unreadable preferences: {e}");
            Map::new()
        }
    };

    let value: Value = serde_json::to_value(settings).map_err(|e| {
        Error::json_error(
            "writing".to_string(),
            "preferences".to_string(),
            path.to_string(),
            e,
        )
    })?;
    store.insert(SETTINGS_KEY.to_string(), value);

    write_preferences_store(path, &store)
}
