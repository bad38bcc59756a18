//! Location of the extension's settings file.
//!
//! The shell extension keeps its settings next to its own code, in the user
//! data directory:
//!
//! ```text
//! $XDG_DATA_HOME/gnome-shell/extensions/web-application-menu@atomant/settings.json
//! ```
//!
//! with `$XDG_DATA_HOME` defaulting to `~/.local/share`.

use std::ffi::OsString;
use std::path::PathBuf;

use thiserror::Error;

/// Directory name the extension is installed under.
pub const EXTENSION_UUID: &str = "web-application-menu@atomant";

/// Settings file name inside the extension directory.
pub const SETTINGS_FILE_NAME: &str = "settings.json";

/// Error type for settings path resolution.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// Neither `XDG_DATA_HOME` nor `HOME` is set.
    #[error("could not determine the user data directory")]
    NoDataDir,
}

/// Resolves the default settings file path from the environment.
///
/// # Errors
///
/// Returns [`ConfigError::NoDataDir`] when the user data directory cannot be
/// determined.
pub fn default_settings_path() -> Result<PathBuf, ConfigError> {
    settings_path_from(
        std::env::var_os("XDG_DATA_HOME"),
        std::env::var_os("HOME"),
    )
}

fn settings_path_from(
    xdg_data_home: Option<OsString>,
    home: Option<OsString>,
) -> Result<PathBuf, ConfigError> {
    // An empty XDG_DATA_HOME must be treated as unset.
    let data_dir = xdg_data_home
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| home.map(|h| PathBuf::from(h).join(".local").join("share")))
        .ok_or(ConfigError::NoDataDir)?;

    Ok(data_dir
        .join("gnome-shell")
        .join("extensions")
        .join(EXTENSION_UUID)
        .join(SETTINGS_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xdg_data_home_takes_precedence() {
        let path = settings_path_from(Some("/data".into()), Some("/home/me".into())).unwrap();
        assert_eq!(
            path,
            PathBuf::from("/data/gnome-shell/extensions/web-application-menu@atomant/settings.json")
        );
    }

    #[test]
    fn test_falls_back_to_home_local_share() {
        let path = settings_path_from(None, Some("/home/me".into())).unwrap();
        assert_eq!(
            path,
            PathBuf::from(
                "/home/me/.local/share/gnome-shell/extensions/web-application-menu@atomant/settings.json"
            )
        );
    }

    #[test]
    fn test_empty_xdg_data_home_is_ignored() {
        let path = settings_path_from(Some("".into()), Some("/home/me".into())).unwrap();
        assert!(path.starts_with("/home/me/.local/share"));
    }

    #[test]
    fn test_no_environment_is_an_error() {
        assert_eq!(settings_path_from(None, None), Err(ConfigError::NoDataDir));
    }

    #[test]
    fn test_default_path_ends_with_settings_json() {
        // Either outcome is acceptable in a stripped CI environment.
        if let Ok(path) = default_settings_path() {
            assert!(path.ends_with(SETTINGS_FILE_NAME));
        }
    }
}
