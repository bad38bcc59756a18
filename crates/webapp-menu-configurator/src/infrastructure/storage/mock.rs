//! In-memory settings repository for unit testing.
//!
//! Lets tests drive an [`EditSession`](crate::application::edit_session::EditSession)
//! without touching the file system, inject load diagnostics, and force save
//! failures.

use std::sync::{Arc, Mutex};

use webapp_menu_core::{LoadOutcome, Settings};

use crate::application::repository::{SaveError, SettingsRepository};

/// A mock implementation of [`SettingsRepository`].
///
/// `load` returns the most recently saved settings when there are any, and
/// the initial outcome otherwise.
pub struct MockSettingsRepository {
    initial: LoadOutcome,
    saved: Arc<Mutex<Vec<Settings>>>,
    fail_saves: Arc<Mutex<bool>>,
}

impl MockSettingsRepository {
    /// Creates a repository whose document loads cleanly as `settings`.
    pub fn with(settings: Settings) -> Self {
        Self::from_outcome(LoadOutcome::clean(settings))
    }

    /// Creates a repository that returns `outcome` from the first load.
    pub fn from_outcome(outcome: LoadOutcome) -> Self {
        Self {
            initial: outcome,
            saved: Arc::new(Mutex::new(Vec::new())),
            fail_saves: Arc::new(Mutex::new(false)),
        }
    }

    /// Makes subsequent saves fail with [`SaveError::WriteFailed`].
    pub fn fail_saves(&self, fail: bool) {
        *self.fail_saves.lock().expect("lock poisoned") = fail;
    }

    /// Every document saved so far, oldest first.
    pub fn saved(&self) -> Vec<Settings> {
        self.saved.lock().expect("lock poisoned").clone()
    }
}

impl Default for MockSettingsRepository {
    fn default() -> Self {
        Self::with(Settings::default())
    }
}

impl SettingsRepository for MockSettingsRepository {
    fn load(&self) -> LoadOutcome {
        match self.saved.lock().expect("lock poisoned").last() {
            Some(settings) => LoadOutcome::clean(settings.clone()),
            None => self.initial.clone(),
        }
    }

    fn save(&self, settings: &Settings) -> Result<(), SaveError> {
        if *self.fail_saves.lock().expect("lock poisoned") {
            return Err(SaveError::WriteFailed {
                path: "mock://settings.json".into(),
                source: std::io::Error::new(std::io::ErrorKind::Other, "mock write failure"),
            });
        }
        self.saved
            .lock()
            .expect("lock poisoned")
            .push(settings.clone());
        Ok(())
    }
}
