//! Field-by-field validation and repair of a loosely typed settings document.
//!
//! The settings file is edited by two programs and occasionally by hand, so a
//! single wrong field must not throw the whole document away.  The repair pass
//! walks the parsed JSON object and, for every expected key:
//!
//! - keeps the value when it has the expected JSON kind (no range checks),
//! - otherwise substitutes the canonical default and records the key.
//!
//! Profiles are then checked one by one.  An entry without a string `name`
//! and a string `directory` is dropped as a whole and its 1-based position in
//! the original array is recorded.  Survivors keep their relative order.
//!
//! When `profiles` itself is missing or not an array it is replaced by an
//! empty list, so there is nothing left to check per entry.

use serde_json::{Map, Value};
use tracing::debug;

use crate::domain::settings::{keys, Profile, Settings};

/// What the repair pass had to change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepairReport {
    /// Keys that were absent or mistyped, in check order.
    pub repaired_keys: Vec<&'static str>,
    /// 1-based positions of dropped profile entries.
    pub dropped_profiles: Vec<usize>,
}

impl RepairReport {
    /// `true` when the document matched the schema exactly.
    pub fn is_clean(&self) -> bool {
        self.repaired_keys.is_empty() && self.dropped_profiles.is_empty()
    }
}

/// Builds a fully typed [`Settings`] from a parsed JSON object.
///
/// Never fails: every divergence from the schema is repaired and reported in
/// the returned [`RepairReport`].  Unknown keys are ignored.
pub fn repair_document(document: &Map<String, Value>) -> (Settings, RepairReport) {
    let defaults = Settings::default();
    let mut report = RepairReport::default();

    let use_default_profile = bool_field(
        document,
        keys::USE_DEFAULT_PROFILE,
        defaults.use_default_profile,
        &mut report,
    );
    let split_profile_view = bool_field(
        document,
        keys::SPLIT_PROFILE_VIEW,
        defaults.split_profile_view,
        &mut report,
    );
    let show_icons = bool_field(document, keys::SHOW_ICONS, defaults.show_icons, &mut report);
    let hide_entries_not_in_xdg_dir = bool_field(
        document,
        keys::HIDE_ENTRIES_NOT_IN_XDG_DIR,
        defaults.hide_entries_not_in_xdg_dir,
        &mut report,
    );

    // Any JSON integer counts; one above i64::MAX saturates.  Floats such as
    // 16.0 and booleans are mistyped.
    let icon_size = match document.get(keys::ICON_SIZE).and_then(integer_value) {
        Some(size) => size,
        None => {
            report.repaired_keys.push(keys::ICON_SIZE);
            defaults.icon_size
        }
    };

    let profiles = match document.get(keys::PROFILES) {
        Some(Value::Array(entries)) => profiles_field(entries, &mut report),
        _ => {
            report.repaired_keys.push(keys::PROFILES);
            defaults.profiles
        }
    };

    if !report.is_clean() {
        debug!(
            repaired_keys = ?report.repaired_keys,
            dropped_profiles = ?report.dropped_profiles,
            "settings document repaired"
        );
    }

    let settings = Settings {
        icon_size,
        show_icons,
        use_default_profile,
        split_profile_view,
        hide_entries_not_in_xdg_dir,
        profiles,
    };
    (settings, report)
}

fn bool_field(
    document: &Map<String, Value>,
    key: &'static str,
    default: bool,
    report: &mut RepairReport,
) -> bool {
    match document.get(key).and_then(Value::as_bool) {
        Some(value) => value,
        None => {
            report.repaired_keys.push(key);
            default
        }
    }
}

fn integer_value(value: &Value) -> Option<i64> {
    value
        .as_i64()
        .or_else(|| value.as_u64().map(|_| i64::MAX))
}

fn profiles_field(entries: &[Value], report: &mut RepairReport) -> Vec<Profile> {
    let mut profiles = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        match profile_entry(entry) {
            Some(profile) => profiles.push(profile),
            None => report.dropped_profiles.push(index + 1),
        }
    }
    profiles
}

fn profile_entry(entry: &Value) -> Option<Profile> {
    let object = entry.as_object()?;
    let name = object.get(keys::PROFILE_NAME)?.as_str()?;
    let directory = object.get(keys::PROFILE_DIRECTORY)?.as_str()?;
    Some(Profile::new(name, directory))
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("fixture must be an object, got {other}"),
        }
    }

    #[test]
    fn test_valid_document_is_accepted_unchanged() {
        // Arrange
        let doc = object(json!({
            "icon-size": 24,
            "show-icons": false,
            "use-default-profile": false,
            "split-profile-view": true,
            "hide-entries-not-in-xdg-dir": false,
            "profiles": [ { "name": "A", "directory": "/a" } ]
        }));

        // Act
        let (settings, report) = repair_document(&doc);

        // Assert
        assert!(report.is_clean());
        assert_eq!(settings.icon_size, 24);
        assert!(!settings.show_icons);
        assert!(!settings.use_default_profile);
        assert!(settings.split_profile_view);
        assert!(!settings.hide_entries_not_in_xdg_dir);
        assert_eq!(settings.profiles, vec![Profile::new("A", "/a")]);
    }

    #[test]
    fn test_empty_object_repairs_every_key_in_check_order() {
        let (settings, report) = repair_document(&Map::new());

        assert_eq!(settings, Settings::default());
        assert_eq!(
            report.repaired_keys,
            vec![
                keys::USE_DEFAULT_PROFILE,
                keys::SPLIT_PROFILE_VIEW,
                keys::SHOW_ICONS,
                keys::HIDE_ENTRIES_NOT_IN_XDG_DIR,
                keys::ICON_SIZE,
                keys::PROFILES,
            ]
        );
        assert!(report.dropped_profiles.is_empty());
    }

    #[test]
    fn test_string_icon_size_is_replaced_and_other_fields_kept() {
        // Arrange
        let doc = object(json!({
            "icon-size": "big",
            "show-icons": false,
            "use-default-profile": true,
            "split-profile-view": false,
            "hide-entries-not-in-xdg-dir": true,
            "profiles": []
        }));

        // Act
        let (settings, report) = repair_document(&doc);

        // Assert
        assert_eq!(settings.icon_size, 16);
        assert!(!settings.show_icons);
        assert!(!settings.split_profile_view);
        assert_eq!(report.repaired_keys, vec![keys::ICON_SIZE]);
    }

    #[test]
    fn test_float_and_bool_icon_sizes_are_mistyped() {
        for bad in [json!(16.0), json!(true), json!(null)] {
            let doc = object(json!({ "icon-size": bad }));
            let (settings, report) = repair_document(&doc);
            assert_eq!(settings.icon_size, 16);
            assert!(report.repaired_keys.contains(&keys::ICON_SIZE));
        }
    }

    #[test]
    fn test_out_of_range_icon_size_is_not_clamped_on_load() {
        let doc = object(json!({ "icon-size": 4096 }));
        let (settings, report) = repair_document(&doc);
        assert_eq!(settings.icon_size, 4096);
        assert!(!report.repaired_keys.contains(&keys::ICON_SIZE));
    }

    #[test]
    fn test_icon_size_above_i64_max_saturates() {
        // Arrange: serde_json stores this literal as a u64
        let doc: Map<String, Value> =
            serde_json::from_str(r#"{ "icon-size": 9223372036854775808 }"#).unwrap();

        // Act
        let (settings, report) = repair_document(&doc);

        // Assert
        assert_eq!(settings.icon_size, i64::MAX);
        assert!(!report.repaired_keys.contains(&keys::ICON_SIZE));
    }

    #[test]
    fn test_numeric_flag_is_mistyped() {
        let doc = object(json!({ "show-icons": 1 }));
        let (settings, report) = repair_document(&doc);
        assert!(settings.show_icons);
        assert!(report.repaired_keys.contains(&keys::SHOW_ICONS));
    }

    #[test]
    fn test_bad_profile_is_dropped_and_position_reported() {
        // Arrange
        let doc = object(json!({
            "profiles": [
                { "name": "A", "directory": "/a" },
                { "name": "B" },
                { "name": "C", "directory": "/c" }
            ]
        }));

        // Act
        let (settings, report) = repair_document(&doc);

        // Assert
        assert_eq!(
            settings.profiles,
            vec![Profile::new("A", "/a"), Profile::new("C", "/c")]
        );
        assert_eq!(report.dropped_profiles, vec![2]);
        assert!(!report.repaired_keys.contains(&keys::PROFILES));
    }

    #[test]
    fn test_positions_refer_to_original_array() {
        let doc = object(json!({
            "profiles": [
                { "name": 1, "directory": "/a" },
                "not an object",
                { "name": "C", "directory": "/c" },
                { "directory": "/d" },
                { "name": "E", "directory": ["/e"] }
            ]
        }));

        let (settings, report) = repair_document(&doc);

        assert_eq!(settings.profiles, vec![Profile::new("C", "/c")]);
        assert_eq!(report.dropped_profiles, vec![1, 2, 4, 5]);
    }

    #[test]
    fn test_non_array_profiles_replaced_wholesale() {
        let doc = object(json!({ "profiles": { "name": "A", "directory": "/a" } }));

        let (settings, report) = repair_document(&doc);

        assert!(settings.profiles.is_empty());
        assert!(report.repaired_keys.contains(&keys::PROFILES));
        assert!(report.dropped_profiles.is_empty());
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let mut doc = object(serde_json::to_value(Settings::default()).unwrap());
        doc.insert("legacy-option".to_string(), json!(42));

        let (settings, report) = repair_document(&doc);

        assert!(report.is_clean());
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_extra_profile_fields_are_discarded() {
        let doc = object(json!({
            "profiles": [ { "name": "A", "directory": "/a", "colour": "red" } ]
        }));

        let (settings, report) = repair_document(&doc);

        assert!(report.dropped_profiles.is_empty());
        assert_eq!(settings.profiles, vec![Profile::new("A", "/a")]);
    }
}
