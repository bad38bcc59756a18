//! Storage infrastructure: settings file persistence.
//!
//! - **`settings_store`** – reads, repairs and atomically writes the JSON
//!   settings document.
//! - **`paths`** – resolves the default settings location in the user data
//!   directory.
//! - **`mock`** – an in-memory repository for tests.

pub mod mock;
pub mod paths;
pub mod settings_store;
