//! JSON settings file persistence.
//!
//! # Loading
//!
//! [`load_settings`] never fails.  It degrades to the canonical defaults when
//! the file is missing, unreadable, or not a JSON object, and otherwise runs
//! the document through [`repair_document`].  Every problem becomes a
//! [`Diagnostic`] in the returned [`LoadOutcome`].
//!
//! # Saving
//!
//! [`save_settings`] makes sure the parent directory exists (creating it if
//! needed), serializes the settings, and swaps the new content in with a
//! temp-file-then-rename.  The previous file stays intact until the new one
//! is complete on disk, so the shell extension never reads a half-written
//! document.  A settings path that is a symlink keeps being one: the file it
//! points at is the one replaced.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, error, info, warn};
use uuid::Uuid;
use webapp_menu_core::{repair_document, Diagnostic, LoadOutcome, Settings};

use crate::application::repository::{SaveError, SettingsRepository};

/// A settings file at a fixed path.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsRepository for SettingsStore {
    fn load(&self) -> LoadOutcome {
        load_settings(&self.path)
    }

    fn save(&self, settings: &Settings) -> Result<(), SaveError> {
        save_settings(&self.path, settings)
    }
}

/// Loads the settings document at `path`.
pub fn load_settings(path: &Path) -> LoadOutcome {
    let outcome = read_document(path);
    if outcome.diagnostics.is_empty() {
        info!(path = %path.display(), profiles = outcome.settings.profiles.len(), "settings loaded");
    }
    for diagnostic in &outcome.diagnostics {
        match diagnostic {
            Diagnostic::Unreadable { reason, .. } | Diagnostic::MalformedJson { reason, .. } => {
                warn!(path = %path.display(), %reason, "settings file rejected, using defaults")
            }
            Diagnostic::NotFound { .. } => {
                warn!(path = %path.display(), "settings file not found, using defaults")
            }
            Diagnostic::SchemaRepaired(report) => warn!(
                path = %path.display(),
                repaired_keys = ?report.repaired_keys,
                dropped_profiles = ?report.dropped_profiles,
                "settings file repaired"
            ),
        }
    }
    outcome
}

fn read_document(path: &Path) -> LoadOutcome {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return LoadOutcome::defaults(Diagnostic::NotFound {
                path: path.to_path_buf(),
            });
        }
        Err(e) => {
            return LoadOutcome::defaults(Diagnostic::Unreadable {
                path: path.to_path_buf(),
                reason: e.to_string(),
            });
        }
    };

    // Invalid UTF-8 is reported by the JSON parser, so it counts as a badly
    // formatted file rather than an unreadable one.
    match serde_json::from_slice::<Value>(&bytes) {
        Ok(Value::Object(document)) => {
            let (settings, report) = repair_document(&document);
            LoadOutcome::from_repair(settings, report)
        }
        Ok(other) => LoadOutcome::defaults(Diagnostic::MalformedJson {
            path: path.to_path_buf(),
            reason: format!("expected a JSON object at the root, found {}", kind_of(&other)),
        }),
        Err(e) => LoadOutcome::defaults(Diagnostic::MalformedJson {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Persists `settings` to `path`, replacing any existing file.
///
/// # Errors
///
/// - [`SaveError::BasePathNotDirectory`] if the parent path is an existing
///   non-directory.  Nothing is written.
/// - [`SaveError::CannotCreateDirectory`] if the missing parent chain could
///   not be created.  Nothing is written.
/// - [`SaveError::WriteFailed`] if writing the temp file or renaming it over
///   `path` fails.  The previous file is left in place.
pub fn save_settings(path: &Path, settings: &Settings) -> Result<(), SaveError> {
    ensure_directory(parent_dir(path))?;

    let target = resolve_link(path);
    let content = serde_json::to_string_pretty(settings)?;
    write_replacing(parent_dir(&target), &target, content.as_bytes(), |temp, target| {
        fs::rename(temp, target)
    })
    .map_err(|source| {
        error!(path = %path.display(), %source, "failed to write settings");
        SaveError::WriteFailed {
            path: path.to_path_buf(),
            source,
        }
    })?;

    info!(path = %path.display(), profiles = settings.profiles.len(), "settings saved");
    Ok(())
}

/// Follows `path` when it is a symlink, so the link survives the rename and
/// the file it points at receives the new content.
///
/// A dangling link is returned as is and gets replaced by a regular file.
fn resolve_link(path: &Path) -> PathBuf {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.file_type().is_symlink() => match fs::canonicalize(path) {
            Ok(real) => {
                debug!(link = %path.display(), target = %real.display(), "saving through symlink");
                real
            }
            Err(source) => {
                debug!(link = %path.display(), %source, "dangling symlink will be replaced");
                path.to_path_buf()
            }
        },
        _ => path.to_path_buf(),
    }
}

/// Parent directory of `path`; a bare file name lives in the current directory.
fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

fn ensure_directory(dir: &Path) -> Result<(), SaveError> {
    match fs::metadata(dir) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => {
            error!(dir = %dir.display(), "settings base path is not a directory");
            Err(SaveError::BasePathNotDirectory {
                path: dir.to_path_buf(),
            })
        }
        Err(_) => {
            debug!(dir = %dir.display(), "creating settings directory");
            fs::create_dir_all(dir).map_err(|source| {
                error!(dir = %dir.display(), %source, "could not create settings directory");
                SaveError::CannotCreateDirectory {
                    path: dir.to_path_buf(),
                    source,
                }
            })
        }
    }
}

/// Writes `bytes` to a fresh temp file in `dir`, then `commit`s it over
/// `path` (a rename in production).
///
/// `path` is untouched until `commit` runs.  If anything fails the temp file
/// is removed.  After a successful commit the directory entry is synced too.
fn write_replacing(
    dir: &Path,
    path: &Path,
    bytes: &[u8],
    commit: impl FnOnce(&Path, &Path) -> io::Result<()>,
) -> io::Result<()> {
    let file_name = path
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "path has no file name"))?;
    let temp = dir.join(format!(
        ".{}.{}.tmp",
        file_name.to_string_lossy(),
        Uuid::new_v4().simple()
    ));
    debug!(temp = %temp.display(), "writing settings to temp file");

    let result = write_synced(&temp, bytes).and_then(|()| commit(&temp, path));
    if result.is_err() {
        // Best effort; the temp file may not exist if creating it failed.
        let _ = fs::remove_file(&temp);
        return result;
    }

    // The new content is already in place; a failed directory sync only
    // weakens durability across a crash.
    if let Err(source) = sync_dir(dir) {
        warn!(dir = %dir.display(), %source, "could not sync settings directory");
    }
    Ok(())
}

#[cfg(unix)]
fn sync_dir(dir: &Path) -> io::Result<()> {
    fs::File::open(dir)?.sync_all()
}

#[cfg(not(unix))]
fn sync_dir(_dir: &Path) -> io::Result<()> {
    Ok(())
}

fn write_synced(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut file = OpenOptions::new().write(true).create_new(true).open(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
