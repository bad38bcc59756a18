//! Settings document schema enforcement.
//!
//! - **`repair`** – turns a parsed JSON object into a fully typed
//!   [`Settings`](crate::Settings), substituting defaults for absent or
//!   mistyped fields and dropping malformed profile entries.
//!
//! - **`diagnostic`** – the data describing what a load had to fix, and its
//!   user-facing text.

pub mod diagnostic;
pub mod repair;

pub use diagnostic::{Diagnostic, LoadOutcome};
pub use repair::{repair_document, RepairReport};
