//! Configuration path utilities and defaults.
//!
//! This module provides functions for resolving file paths and expanding
//! shell variables like `~` in paths.

/// Default path for the preferences file
const DEFAULT_PREFERENCES_PATH: &str = "~/.ytdlp-commands/preferences.json";

/// Program token used when no tool path is configured
pub const DEFAULT_TOOL_PATH: &str = "yt-dlp";

/// Key the local settings are stored under in the preferences file
pub const SETTINGS_KEY: &str = "localSettings_v1";

/// Resolves the preferences file path.
///
/// If a custom path is provided, uses that path. Otherwise, uses the default
/// preferences path. Shell expansions like `~` are resolved.
///
/// # Examples
///
/// ```
/// use ytdlp_commands_core::config::get_preferences_path;
///
/// // Use default path
/// let default_path = get_preferences_path(&None);
///
/// // Use custom path
/// let custom_path = get_preferences_path(&Some("/path/to/preferences.json".to_string()));
/// ```
pub fn get_preferences_path(preferences_path_arg: &Option<String>) -> String {
    let preferences_path = match preferences_path_arg {
        Some(preferences_path) => preferences_path,
        None => DEFAULT_PREFERENCES_PATH,
    };

    shellexpand::tilde(preferences_path).to_string()
}

/// Expands shell variables like `~` in an optional path.
///
/// Returns None if no path is provided.
///
/// # Examples
///
/// ```
/// use ytdlp_commands_core::config::expand_path;
///
/// let expanded = expand_path(&Some("~/catalog.yml".to_string()));
/// assert!(expanded.is_some());
///
/// assert!(expand_path(&None).is_none());
/// ```
pub fn expand_path(path: &Option<String>) -> Option<String> {
    path.as_ref()
        .map(|path| shellexpand::tilde(path).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_preferences_path_with_custom_path() {
        let custom_path = Some("/custom/path/preferences.json".to_string());
        let result = get_preferences_path(&custom_path);
        assert_eq!(result, "/custom/path/preferences.json");
    }

    #[test]
    fn test_get_preferences_path_with_none() {
        let result = get_preferences_path(&None);
        // Should expand the tilde in the default path
        assert!(result.ends_with("preferences.json"));
        assert!(!result.starts_with('~'));
    }

    #[test]
    fn test_get_preferences_path_with_tilde() {
        let result = get_preferences_path(&Some("~/prefs.json".to_string()));
        assert!(!result.starts_with('~'));
        assert!(result.ends_with("prefs.json"));
    }

    #[test]
    fn test_expand_path() {
        let expanded = expand_path(&Some("~/catalogs/options.yml".to_string())).unwrap();
        assert!(!expanded.starts_with('~'));
        assert!(expanded.ends_with("catalogs/options.yml"));

        assert_eq!(
            expand_path(&Some("/absolute/options.yml".to_string())),
            Some("/absolute/options.yml".to_string())
        );
        assert!(expand_path(&None).is_none());
    }

    #[test]
    fn test_default_tool_path_constant() {
        assert_eq!(DEFAULT_TOOL_PATH, "yt-dlp");
    }
}
