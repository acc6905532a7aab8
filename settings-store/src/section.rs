//! Lock-guarded group of named settings.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::RwLock;

use settings_primitives::{Error, Result, Value, ValueInput};

/// A named group of settings, analogous to an INI `[section]` block.
///
/// All access goes through an internal read/write lock, so a section can be
/// shared between threads (usually as an `Arc<Section>` handed out by
/// [`Settings::get_section`](crate::Settings::get_section)). Keys are kept
/// sorted, which makes [`Section::render`] deterministic.
#[derive(Default)]
pub struct Section {
    values: RwLock<BTreeMap<String, Value>>,
}

impl fmt::Debug for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let values = self.values.read().expect("settings section poisoned");
        f.debug_struct("Section")
            .field("values", &*values)
            .finish()
    }
}

impl Section {
    /// Creates an empty section.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a typed setting, replacing any previous value under `name`.
    ///
    /// # Panics
    ///
    /// Panics if the internal section lock is poisoned.
    pub fn set(&self, name: impl Into<String>, input: impl Into<ValueInput>) {
        self.insert(Value::new(name, input));
    }

    /// Stores an already constructed value under its own name.
    ///
    /// # Panics
    ///
    /// Panics if the internal section lock is poisoned.
    pub fn insert(&self, value: Value) {
        let mut values = self.values.write().expect("settings section poisoned");
        values.insert(value.name().to_owned(), value);
    }

    /// Removes the setting if present, returning whether anything was removed.
    ///
    /// # Panics
    ///
    /// Panics if the internal section lock is poisoned.
    pub fn delete(&self, name: &str) -> bool {
        let mut values = self.values.write().expect("settings section poisoned");
        values.remove(name).is_some()
    }

    /// Returns a copy of the stored value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`] if no setting is stored under `name`.
    ///
    /// # Panics
    ///
    /// Panics if the internal section lock is poisoned.
    pub fn value(&self, name: &str) -> Result<Value> {
        let values = self.values.read().expect("settings section poisoned");
        values
            .get(name)
            .cloned()
            .ok_or_else(|| Error::key_not_found(name))
    }

    /// Returns the setting as a string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`] if the key is missing.
    pub fn get(&self, name: &str) -> Result<String> {
        self.value(name).map(|value| value.as_str().to_owned())
    }

    /// Returns the setting as an integer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`] if the key is missing and
    /// [`Error::InvalidInteger`] if the value is not an integer literal.
    pub fn get_int(&self, name: &str) -> Result<i64> {
        self.value(name)?.as_int()
    }

    /// Returns the setting interpreted as a boolean.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`] if the key is missing.
    pub fn get_bool(&self, name: &str) -> Result<bool> {
        self.value(name).map(|value| value.as_bool())
    }

    /// Returns the setting split into a list of strings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`] if the key is missing.
    pub fn get_string_list(&self, name: &str) -> Result<Vec<String>> {
        self.value(name).map(|value| value.as_string_list())
    }

    /// Returns `true` if a setting is stored under `name`.
    ///
    /// # Panics
    ///
    /// Panics if the internal section lock is poisoned.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        let values = self.values.read().expect("settings section poisoned");
        values.contains_key(name)
    }

    /// Copies out every stored value, in key order.
    pub(crate) fn values(&self) -> Vec<Value> {
        let values = self.values.read().expect("settings section poisoned");
        values.values().cloned().collect()
    }

    /// Returns the setting names in sorted order.
    ///
    /// # Panics
    ///
    /// Panics if the internal section lock is poisoned.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        let values = self.values.read().expect("settings section poisoned");
        values.keys().cloned().collect()
    }

    /// Number of settings held.
    ///
    /// # Panics
    ///
    /// Panics if the internal section lock is poisoned.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.read().expect("settings section poisoned").len()
    }

    /// Returns `true` if the section holds no settings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Renders every setting as a `name = raw` line, each terminated by `\n`,
    /// in key order.
    #[must_use]
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let values = self.values.read().expect("settings section poisoned");
        for value in values.values() {
            writeln!(f, "{value}")?;
        }
        Ok(())
    }
}
