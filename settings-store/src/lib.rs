//! Thread-safe, sectioned settings store with an INI-like text format.
//!
//! [`Settings`] owns a registry of [`Section`]s keyed by name, the empty name
//! being the always-present root section. Each section maps setting names to
//! [`Value`]s kept in canonical string form.

#![warn(missing_docs, clippy::pedantic)]

mod format;
mod section;
mod settings;

/// Text format constants and load reporting.
pub use format::{LoadSummary, MIN_LINE_LEN};
/// Lock-guarded group of named settings.
pub use section::Section;
/// Section registry with file load and save.
pub use settings::{ROOT_SECTION, Settings};
/// Re-export shared primitives for convenience.
pub use settings_primitives::{Error, Result, Value, ValueInput};
