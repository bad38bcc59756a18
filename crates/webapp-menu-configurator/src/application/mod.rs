//! Application layer for the configurator.
//!
//! - **`repository`** – the [`SettingsRepository`](repository::SettingsRepository)
//!   trait the session persists through, and its [`SaveError`](repository::SaveError).
//!
//! - **`edit_session`** – the edit state behind the preferences dialog:
//!   option toggles, profile add/rename/remove, apply and reload, and the
//!   unsaved-changes flag.
//!
//! No file system access happens here.

pub mod edit_session;
pub mod repository;
