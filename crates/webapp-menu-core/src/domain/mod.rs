//! Domain entities for the Web App Menu configurator.
//!
//! Pure data with no file system access.  The settings document is the only
//! thing the configurator and the shell extension share, so its shape lives
//! here where both the store and the edit session can depend on it.

/// Settings document and browser profiles.
///
/// See [`settings::Settings`] for the main type.
pub mod settings;
