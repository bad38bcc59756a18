//! # webapp-menu-core
//!
//! Shared library for the Web App Menu configurator containing the settings
//! document model, its canonical defaults, and the rules for repairing a
//! document that does not match the schema.
//!
//! It has no file system access; reading and writing the document is done by
//! the `webapp-menu-configurator` crate.
//!
//! - **`domain`** – [`Settings`] and [`Profile`], the typed view of the JSON
//!   file the GNOME Shell extension reads.
//!
//! - **`schema`** – validation of a loosely typed JSON document against the
//!   defaults table, and the [`Diagnostic`]s describing what was repaired.

pub mod domain;
pub mod schema;

pub use domain::settings::{keys, Profile, Settings, ICON_SIZE_RANGE};
pub use schema::diagnostic::{Diagnostic, LoadOutcome};
pub use schema::repair::{repair_document, RepairReport};
