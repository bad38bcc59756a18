//! Settings document entities.
//!
//! [`Settings`] mirrors the JSON document shared between the configurator and
//! the GNOME Shell extension.  Field names are serialized in kebab-case so the
//! on-disk keys match what the extension reads:
//!
//! ```json
//! {
//!   "icon-size": 16,
//!   "show-icons": true,
//!   "use-default-profile": true,
//!   "split-profile-view": true,
//!   "hide-entries-not-in-xdg-dir": true,
//!   "profiles": [ { "name": "Work", "directory": "/home/me/.config/epiphany-work" } ]
//! }
//! ```
//!
//! The derive is used for writing and for round-trip tests.  Reading goes
//! through [`crate::schema::repair_document`], because a document written by
//! hand may be partially wrong and must be repaired rather than rejected.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

/// Stored key names, in the order the repair pass checks them.
pub mod keys {
    pub const USE_DEFAULT_PROFILE: &str = "use-default-profile";
    pub const SPLIT_PROFILE_VIEW: &str = "split-profile-view";
    pub const SHOW_ICONS: &str = "show-icons";
    pub const HIDE_ENTRIES_NOT_IN_XDG_DIR: &str = "hide-entries-not-in-xdg-dir";
    pub const ICON_SIZE: &str = "icon-size";
    pub const PROFILES: &str = "profiles";

    pub const PROFILE_NAME: &str = "name";
    pub const PROFILE_DIRECTORY: &str = "directory";
}

/// Bounds of the icon size spin control.
///
/// Only edits are clamped to this range.  Loading accepts any integer.
pub const ICON_SIZE_RANGE: RangeInclusive<i64> = 4..=1024;

pub const DEFAULT_ICON_SIZE: i64 = 16;
pub const DEFAULT_SHOW_ICONS: bool = true;
pub const DEFAULT_USE_DEFAULT_PROFILE: bool = true;
pub const DEFAULT_SPLIT_PROFILE_VIEW: bool = true;
pub const DEFAULT_HIDE_ENTRIES_NOT_IN_XDG_DIR: bool = true;

/// Root configuration object.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct Settings {
    /// Pixel size of the menu entry icons.
    pub icon_size: i64,
    /// Whether menu entries show their application icon.
    pub show_icons: bool,
    /// Whether the browser's default profile gets its own menu section.
    pub use_default_profile: bool,
    /// Whether each profile is shown in its own submenu.
    pub split_profile_view: bool,
    /// Whether entries without a desktop file in the XDG data dir are hidden.
    pub hide_entries_not_in_xdg_dir: bool,
    /// Additional profiles.  Order defines menu order.
    pub profiles: Vec<Profile>,
}

/// One named browser profile.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Profile {
    pub name: String,
    /// Profile directory.  Opaque to the configurator.
    pub directory: String,
}

impl Profile {
    pub fn new(name: impl Into<String>, directory: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            directory: directory.into(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            icon_size: DEFAULT_ICON_SIZE,
            show_icons: DEFAULT_SHOW_ICONS,
            use_default_profile: DEFAULT_USE_DEFAULT_PROFILE,
            split_profile_view: DEFAULT_SPLIT_PROFILE_VIEW,
            hide_entries_not_in_xdg_dir: DEFAULT_HIDE_ENTRIES_NOT_IN_XDG_DIR,
            profiles: Vec::new(),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
