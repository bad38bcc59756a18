//! Infrastructure layer for the configurator.
//!
//! Contains the file-system adapters behind the application layer's
//! [`SettingsRepository`](crate::application::repository::SettingsRepository).
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `webapp_menu_core`, but MUST NOT be imported by the `application` layer
//! outside of tests.

pub mod storage;
