//! webapp-menu-configurator: settings store and edit session for the Web App
//! Menu GNOME Shell extension.
//!
//! ```text
//! application/     EditSession, SettingsRepository trait, SaveError
//! infrastructure/
//!   storage/       SettingsStore (JSON file), default path, mock repository
//! ```
//!
//! Integration tests in `tests/` and the `webapp-menu-check` binary share
//! this module tree.

pub mod application;
pub mod infrastructure;

pub use application::edit_session::{EditError, EditSession};
pub use application::repository::{SaveError, SettingsRepository};
pub use infrastructure::storage::settings_store::{load_settings, save_settings, SettingsStore};
