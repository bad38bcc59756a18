//! Persistence abstraction used by the edit session.
//!
//! The production implementation is
//! [`SettingsStore`](crate::infrastructure::storage::settings_store::SettingsStore),
//! bound to one JSON file.  Tests use
//! [`MockSettingsRepository`](crate::infrastructure::storage::mock::MockSettingsRepository).

use std::path::PathBuf;

use thiserror::Error;
use webapp_menu_core::{LoadOutcome, Settings};

/// Error type for saving a settings document.
///
/// Every variant is fatal to that save attempt only; the caller keeps its
/// edit state and shows the message to the user.
#[derive(Debug, Error)]
pub enum SaveError {
    /// The parent of the settings file exists but is not a directory.
    #[error("The base path is not a directory!")]
    BasePathNotDirectory { path: PathBuf },

    /// The parent directory chain could not be created.
    #[error("Could not create the base directory!")]
    CannotCreateDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing or replacing the settings file failed.
    #[error("Error writing to file \"{}\":\n{source}", .path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The settings could not be serialized to JSON.
    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Loads and saves the settings document for one edit session.
pub trait SettingsRepository {
    /// Loads the document.  Never fails; problems are reported as diagnostics.
    fn load(&self) -> LoadOutcome;

    /// Replaces the stored document with `settings`.
    fn save(&self, settings: &Settings) -> Result<(), SaveError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_failed_message_includes_path_and_cause() {
        let err = SaveError::WriteFailed {
            path: PathBuf::from("/x/settings.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(
            err.to_string(),
            "Error writing to file \"/x/settings.json\":\ndenied"
        );
    }

    #[test]
    fn test_directory_errors_use_dialog_text() {
        let not_dir = SaveError::BasePathNotDirectory {
            path: PathBuf::from("/x"),
        };
        assert_eq!(not_dir.to_string(), "The base path is not a directory!");

        let mkdir = SaveError::CannotCreateDirectory {
            path: PathBuf::from("/x"),
            source: std::io::Error::new(std::io::ErrorKind::Other, "boom"),
        };
        assert_eq!(mkdir.to_string(), "Could not create the base directory!");
    }
}
