//! Load-time diagnostics.
//!
//! Loading a settings document never fails.  Anything that went wrong is
//! described by a [`Diagnostic`] and handed to the caller together with a
//! usable [`Settings`] value.  The `Display` output is the text shown to the
//! user.

use std::fmt;
use std::path::PathBuf;

use crate::domain::settings::Settings;
use crate::schema::repair::RepairReport;

const DEFAULTS_USED: &str = "Options initialized to their default values.";

/// A non-fatal problem found while loading a settings document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// The settings file does not exist.  Defaults were used.
    NotFound { path: PathBuf },
    /// The file exists but could not be read.  Defaults were used.
    Unreadable { path: PathBuf, reason: String },
    /// The file is not a JSON object.  Defaults were used.
    MalformedJson { path: PathBuf, reason: String },
    /// Some fields were replaced by defaults and/or some profiles dropped.
    SchemaRepaired(RepairReport),
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { path } => write!(
                f,
                "WARNING: file \"{}\" not found!\n{DEFAULTS_USED}",
                path.display()
            ),
            Self::Unreadable { path, .. } => write!(
                f,
                "WARNING: could not read file \"{}\"!\n{DEFAULTS_USED}",
                path.display()
            ),
            Self::MalformedJson { path, .. } => write!(
                f,
                "WARNING: file \"{}\" is badly formatted.\n{DEFAULTS_USED}",
                path.display()
            ),
            Self::SchemaRepaired(report) => {
                if !report.repaired_keys.is_empty() {
                    writeln!(f, "Problems retrieving values for the following keys:")?;
                    for key in &report.repaired_keys {
                        writeln!(f, "{key}")?;
                    }
                    writeln!(f)?;
                }
                if !report.dropped_profiles.is_empty() {
                    writeln!(f, "Problems detecting the following entries:")?;
                    for position in &report.dropped_profiles {
                        writeln!(f, "Error reading profile #{position}")?;
                    }
                }
                Ok(())
            }
        }
    }
}

/// Result of loading a settings document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOutcome {
    /// Always fully schema-valid.
    pub settings: Settings,
    pub diagnostics: Vec<Diagnostic>,
}

impl LoadOutcome {
    /// A clean load with nothing to report.
    pub fn clean(settings: Settings) -> Self {
        Self {
            settings,
            diagnostics: Vec::new(),
        }
    }

    /// Canonical defaults plus the reason they were used.
    pub fn defaults(reason: Diagnostic) -> Self {
        Self {
            settings: Settings::default(),
            diagnostics: vec![reason],
        }
    }

    /// Wraps the output of [`crate::schema::repair_document`].
    pub fn from_repair(settings: Settings, report: RepairReport) -> Self {
        if report.is_clean() {
            Self::clean(settings)
        } else {
            Self {
                settings,
                diagnostics: vec![Diagnostic::SchemaRepaired(report)],
            }
        }
    }

    /// `true` when the in-memory settings differ from what is on disk, i.e.
    /// when writing them back would persist defaults or repairs.
    pub fn needs_save(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::settings::keys;

    #[test]
    fn test_not_found_message_names_the_file() {
        let d = Diagnostic::NotFound {
            path: PathBuf::from("/tmp/settings.json"),
        };
        assert_eq!(
            d.to_string(),
            "WARNING: file \"/tmp/settings.json\" not found!\n\
             Options initialized to their default values."
        );
    }

    #[test]
    fn test_malformed_message_hides_parser_detail() {
        let d = Diagnostic::MalformedJson {
            path: PathBuf::from("s.json"),
            reason: "expected value at line 1 column 1".to_string(),
        };
        let text = d.to_string();
        assert!(text.contains("badly formatted"));
        assert!(!text.contains("line 1"));
    }

    #[test]
    fn test_schema_repaired_lists_keys_then_profiles() {
        // Arrange
        let d = Diagnostic::SchemaRepaired(RepairReport {
            repaired_keys: vec![keys::SHOW_ICONS, keys::ICON_SIZE],
            dropped_profiles: vec![2, 5],
        });

        // Act
        let text = d.to_string();

        // Assert
        assert_eq!(
            text,
            "Problems retrieving values for the following keys:\n\
             show-icons\n\
             icon-size\n\
             \n\
             Problems detecting the following entries:\n\
             Error reading profile #2\n\
             Error reading profile #5\n"
        );
    }

    #[test]
    fn test_schema_repaired_with_only_profiles_omits_key_section() {
        let d = Diagnostic::SchemaRepaired(RepairReport {
            repaired_keys: Vec::new(),
            dropped_profiles: vec![1],
        });
        let text = d.to_string();
        assert!(!text.contains("following keys"));
        assert!(text.contains("Error reading profile #1"));
    }

    #[test]
    fn test_from_clean_repair_has_no_diagnostics() {
        let outcome = LoadOutcome::from_repair(Settings::default(), RepairReport::default());
        assert!(outcome.diagnostics.is_empty());
        assert!(!outcome.needs_save());
    }

    #[test]
    fn test_defaults_outcome_needs_save() {
        let outcome = LoadOutcome::defaults(Diagnostic::NotFound {
            path: PathBuf::from("x.json"),
        });
        assert_eq!(outcome.settings, Settings::default());
        assert!(outcome.needs_save());
    }
}
