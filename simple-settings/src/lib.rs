//! Sectioned key-value settings facade.
//!
//! Depend on this crate to get the whole settings API. It bundles the
//! internal crates behind feature flags so the store can be left out when
//! only the value primitives are needed.
//!
//! ```
//! use simple_settings::Settings;
//!
//! let settings: Settings = "name = demo\n[ net ]\nport = 8080\n".parse().unwrap();
//! assert_eq!(settings.get_int("net", "port").unwrap(), 8080);
//! ```

#![warn(missing_docs, clippy::pedantic)]

/// Re-export shared primitives for convenience.
pub use settings_primitives as primitives;
pub use settings_primitives::{Error, Result, Value, ValueInput};

/// Section registry and text format (enabled by `store` feature).
#[cfg(feature = "store")]
pub use settings_store as store;
#[cfg(feature = "store")]
pub use settings_store::{LoadSummary, ROOT_SECTION, Section, Settings};
