//! EditSession: the configurator's in-memory edit state.
//!
//! A session loads the settings once, lets the presentation layer change
//! options and the profile list, and writes everything back on *Apply*.  It
//! tracks whether there are unsaved changes so the UI can enable the *Apply*
//! and *Reload* buttons and ask before quitting.
//!
//! # Dirty-flag rules
//!
//! - Opening or reloading a document that needed repair (or was missing)
//!   leaves the session dirty, so applying writes the repaired document.
//! - A loaded icon size outside [`ICON_SIZE_RANGE`] is clamped into the
//!   session without marking it dirty; the next apply writes the clamped value.
//! - Any edit that changes a value marks the session dirty.  Setting a value
//!   to what it already is does not.
//! - A successful [`EditSession::apply`] clears the flag.  A failed one leaves
//!   both the flag and the edits untouched.

use thiserror::Error;
use tracing::{debug, info};
use webapp_menu_core::{Diagnostic, LoadOutcome, Profile, Settings, ICON_SIZE_RANGE};

use super::repository::{SaveError, SettingsRepository};

/// Error type for edit operations.
#[derive(Debug, Error)]
pub enum EditError {
    /// A profile name or directory was empty after trimming whitespace.
    #[error("profile name and directory must not be empty")]
    EmptyField,

    /// The index does not refer to an existing profile.
    #[error("no profile at position {index} (have {len})")]
    NoSuchProfile { index: usize, len: usize },

    #[error(transparent)]
    Save(#[from] SaveError),
}

/// Edit state for one settings document.
pub struct EditSession<R: SettingsRepository> {
    repository: R,
    settings: Settings,
    unsaved: bool,
}

impl<R: SettingsRepository> EditSession<R> {
    /// Loads the document and starts a session.
    ///
    /// Returns the load diagnostics for the caller to present.
    pub fn open(repository: R) -> (Self, Vec<Diagnostic>) {
        let outcome = repository.load();
        let mut session = Self {
            repository,
            settings: Settings::default(),
            unsaved: false,
        };
        let diagnostics = session.replace_with(outcome);
        (session, diagnostics)
    }

    /// Discards all edits and loads the document again.
    pub fn reload(&mut self) -> Vec<Diagnostic> {
        let outcome = self.repository.load();
        self.replace_with(outcome)
    }

    fn replace_with(&mut self, outcome: LoadOutcome) -> Vec<Diagnostic> {
        self.unsaved = outcome.needs_save();
        if self.unsaved {
            debug!(
                diagnostics = outcome.diagnostics.len(),
                "loaded document differs from what is stored"
            );
        }
        let mut settings = outcome.settings;
        // The spin button cannot show a value outside its bounds, so the
        // session holds what the UI would. This alone is not an edit.
        settings.icon_size = clamp_icon_size(settings.icon_size);
        self.settings = settings;
        outcome.diagnostics
    }

    /// Writes the current edit state through the repository.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::Save`] when the repository fails; the session
    /// keeps its edits and stays dirty.
    pub fn apply(&mut self) -> Result<(), EditError> {
        let snapshot = self.snapshot();
        self.repository.save(&snapshot)?;
        info!(profiles = snapshot.profiles.len(), "settings applied");
        self.unsaved = false;
        Ok(())
    }

    /// Builds a fresh [`Settings`] from the current edit state.
    ///
    /// Every field is projected explicitly so nothing from an earlier load
    /// can leak into the written document.
    pub fn snapshot(&self) -> Settings {
        Settings {
            icon_size: self.settings.icon_size,
            show_icons: self.settings.show_icons,
            use_default_profile: self.settings.use_default_profile,
            split_profile_view: self.settings.split_profile_view,
            hide_entries_not_in_xdg_dir: self.settings.hide_entries_not_in_xdg_dir,
            profiles: self
                .settings
                .profiles
                .iter()
                .map(|p| Profile::new(p.name.as_str(), p.directory.as_str()))
                .collect(),
        }
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.unsaved
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn profiles(&self) -> &[Profile] {
        &self.settings.profiles
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    // ── Options ───────────────────────────────────────────────────────────────

    /// Sets the icon size, clamped to [`ICON_SIZE_RANGE`].
    ///
    /// Returns the value actually stored.
    pub fn set_icon_size(&mut self, size: i64) -> i64 {
        let clamped = clamp_icon_size(size);
        let current = self.settings.icon_size;
        self.update(clamped != current, |s| s.icon_size = clamped);
        clamped
    }

    pub fn set_show_icons(&mut self, value: bool) {
        let changed = self.settings.show_icons != value;
        self.update(changed, |s| s.show_icons = value);
    }

    pub fn set_use_default_profile(&mut self, value: bool) {
        let changed = self.settings.use_default_profile != value;
        self.update(changed, |s| s.use_default_profile = value);
    }

    pub fn set_split_profile_view(&mut self, value: bool) {
        let changed = self.settings.split_profile_view != value;
        self.update(changed, |s| s.split_profile_view = value);
    }

    pub fn set_hide_entries_not_in_xdg_dir(&mut self, value: bool) {
        let changed = self.settings.hide_entries_not_in_xdg_dir != value;
        self.update(changed, |s| s.hide_entries_not_in_xdg_dir = value);
    }

    fn update(&mut self, changed: bool, apply: impl FnOnce(&mut Settings)) {
        if changed {
            apply(&mut self.settings);
            self.unsaved = true;
        }
    }

    // ── Profiles ──────────────────────────────────────────────────────────────

    /// Appends a profile.  Both fields are trimmed and must not end up empty.
    ///
    /// Returns the index of the new profile.
    pub fn add_profile(&mut self, name: &str, directory: &str) -> Result<usize, EditError> {
        let name = name.trim();
        let directory = directory.trim();
        if name.is_empty() || directory.is_empty() {
            return Err(EditError::EmptyField);
        }
        self.settings.profiles.push(Profile::new(name, directory));
        self.unsaved = true;
        Ok(self.settings.profiles.len() - 1)
    }

    /// Renames the profile at `index`.
    ///
    /// Empty text, or text equal to the current name once trimmed, is ignored
    /// and `Ok(false)` is returned.
    pub fn rename_profile(&mut self, index: usize, name: &str) -> Result<bool, EditError> {
        let profile = self.profile_mut(index)?;
        let changed = replace_trimmed(&mut profile.name, name);
        self.unsaved |= changed;
        Ok(changed)
    }

    /// Changes the directory of the profile at `index`, with the same
    /// trimming rules as [`EditSession::rename_profile`].
    pub fn set_profile_directory(
        &mut self,
        index: usize,
        directory: &str,
    ) -> Result<bool, EditError> {
        let profile = self.profile_mut(index)?;
        let changed = replace_trimmed(&mut profile.directory, directory);
        self.unsaved |= changed;
        Ok(changed)
    }

    /// Removes and returns the profile at `index`.
    pub fn remove_profile(&mut self, index: usize) -> Result<Profile, EditError> {
        let len = self.settings.profiles.len();
        if index >= len {
            return Err(EditError::NoSuchProfile { index, len });
        }
        self.unsaved = true;
        Ok(self.settings.profiles.remove(index))
    }

    fn profile_mut(&mut self, index: usize) -> Result<&mut Profile, EditError> {
        let len = self.settings.profiles.len();
        self.settings
            .profiles
            .get_mut(index)
            .ok_or(EditError::NoSuchProfile { index, len })
    }
}

fn clamp_icon_size(size: i64) -> i64 {
    size.clamp(*ICON_SIZE_RANGE.start(), *ICON_SIZE_RANGE.end())
}

fn replace_trimmed(field: &mut String, text: &str) -> bool {
    let stripped = text.trim();
    if stripped.is_empty() || field.trim() == stripped {
        return false;
    }
    *field = stripped.to_string();
    true
}

// ── Tests ─────────────────────────────────────────────────────────────────────
