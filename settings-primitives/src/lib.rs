//! Core shared types for the settings store: values and errors.

#![warn(missing_docs, clippy::pedantic)]

mod error;
mod value;

/// Error type and result alias shared across the settings crates.
pub use error::{Error, Result};
/// A named setting and the typed input it is built from.
pub use value::{Value, ValueInput};
