//! Shared error definitions for settings primitives and stores.

use std::path::PathBuf;

use thiserror::Error;

/// Result alias used throughout the settings crates.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading, writing or querying settings.
#[derive(Debug, Error)]
pub enum Error {
    /// A lookup named a key the section does not hold.
    #[error("{}", key_not_found_message(.section.as_deref(), .key))]
    KeyNotFound {
        /// Section the lookup ran against, when known.
        section: Option<String>,
        /// The missing key.
        key: String,
    },

    /// A lookup named a section the store does not hold.
    #[error("no such section in settings: `{section}`")]
    SectionNotFound {
        /// The missing section name.
        section: String,
    },

    /// The stored value is not a base-10 integer literal.
    #[error("error parsing param `{key}` to int: `{raw}`")]
    InvalidInteger {
        /// Key of the offending value.
        key: String,
        /// Canonical string that failed to parse.
        raw: String,
    },

    /// A line has no `=` separating key and value.
    #[error("malformed settings line (missing `=`): `{line}`")]
    MalformedLine {
        /// The rejected line.
        line: String,
    },

    /// `add_section` was asked to create a section that already exists.
    #[error("section `{section}` already exists; overwriting is not allowed")]
    DuplicateSection {
        /// Name of the existing section.
        section: String,
    },

    /// The root (unnamed) section cannot be removed.
    #[error("the root settings section cannot be removed")]
    RootSection,

    /// The settings file could not be opened or read.
    #[error("can't load settings file {}: {source}", .path.display())]
    Load {
        /// Path of the file being loaded.
        path: PathBuf,
        /// Source [`std::io::Error`].
        #[source]
        source: std::io::Error,
    },

    /// A settings reader failed before reaching end of input.
    #[error("can't read settings: {source}")]
    Read {
        /// Source [`std::io::Error`].
        #[source]
        source: std::io::Error,
    },

    /// The settings file could not be written.
    #[error("can't save settings file {}: {source}", .path.display())]
    Save {
        /// Path of the file being written.
        path: PathBuf,
        /// Source [`std::io::Error`].
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Helper to construct [`Error::KeyNotFound`] without section context.
    #[must_use]
    pub fn key_not_found(key: impl Into<String>) -> Self {
        Self::KeyNotFound {
            section: None,
            key: key.into(),
        }
    }

    /// Attaches the section name to a [`Error::KeyNotFound`]; other variants
    /// pass through untouched.
    #[must_use]
    pub fn in_section(self, name: &str) -> Self {
        match self {
            Self::KeyNotFound { section: None, key } => Self::KeyNotFound {
                section: Some(name.to_owned()),
                key,
            },
            other => other,
        }
    }

    /// Returns `true` when the error reports a violated caller precondition
    /// rather than an I/O or input-file problem.
    ///
    /// Callers that prefer abort-on-fault can branch on this.
    #[must_use]
    pub fn is_fault(&self) -> bool {
        matches!(
            self,
            Self::KeyNotFound { .. }
                | Self::SectionNotFound { .. }
                | Self::InvalidInteger { .. }
                | Self::DuplicateSection { .. }
                | Self::RootSection
        )
    }
}

fn key_not_found_message(section: Option<&str>, key: &str) -> String {
    match section {
        Some(section) => format!("key `{key}` not found in settings section `{section}`"),
        None => format!("key `{key}` not found in this settings section"),
    }
}
