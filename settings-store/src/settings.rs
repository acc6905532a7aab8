//! Section registry with file load and save.

use std::collections::BTreeMap;
use std::fmt;
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;
use std::sync::{Arc, RwLock};

use settings_primitives::{Error, Result, ValueInput};
use tracing::debug;

use crate::format::{self, LoadSummary};
use crate::section::Section;

/// Name of the root section holding settings that precede any header.
pub const ROOT_SECTION: &str = "";

/// Storage object for program settings, organised into named sections.
///
/// The registry lock only guards the name-to-section map; each [`Section`]
/// carries its own lock. The root section (empty name) is always present.
///
/// ```
/// use settings_store::Settings;
///
/// let settings = Settings::new();
/// settings.set("database", "port", 5432);
/// settings.set("", "verbose", true);
///
/// assert_eq!(settings.get_int("database", "port").unwrap(), 5432);
/// assert_eq!(settings.get("", "verbose").unwrap(), "TRUE");
/// ```
pub struct Settings {
    sections: RwLock<BTreeMap<String, Arc<Section>>>,
}

impl Default for Settings {
    fn default() -> Self {
        let mut sections = BTreeMap::new();
        sections.insert(ROOT_SECTION.to_owned(), Arc::new(Section::new()));
        Self {
            sections: RwLock::new(sections),
        }
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("sections", &self.section_names())
            .finish()
    }
}

impl Settings {
    /// Creates settings holding only an empty root section.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates settings from an INI-like file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Load`] if the file cannot be opened or read.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::read_file(path.as_ref()).map(|(settings, _)| settings)
    }

    /// Merges the content of an INI-like file into these settings.
    ///
    /// Lines without `=` are logged and skipped; they do not fail the load.
    /// The file is parsed in full before anything is merged.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Load`] if the file cannot be opened or read. These
    /// settings are left untouched in that case.
    pub fn load_from_file(&self, path: impl AsRef<Path>) -> Result<LoadSummary> {
        let (staged, summary) = Self::read_file(path.as_ref())?;
        self.merge(&staged);
        Ok(summary)
    }

    /// Merges settings read line by line from any buffered reader.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Read`] if the reader fails. These settings are left
    /// untouched in that case.
    pub fn load_from_reader<R: BufRead>(&self, reader: R) -> Result<LoadSummary> {
        let (staged, summary) = Self::stage(reader).map_err(|source| Error::Read { source })?;
        self.merge(&staged);
        Ok(summary)
    }

    /// Writes [`Settings::render`] to `path`, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Save`] if the file cannot be written.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.render()).map_err(|source| Error::Save {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "settings file saved");
        Ok(())
    }

    /// Looks up a section, optionally creating it when missing.
    ///
    /// The read lock is released before the write lock is taken, and the map
    /// is re-checked under the write lock, so concurrent creators of the same
    /// name all receive one shared section.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SectionNotFound`] if the section is missing and
    /// `create` is `false`.
    ///
    /// # Panics
    ///
    /// Panics if the internal registry lock is poisoned.
    pub fn get_or_create_section(&self, name: &str, create: bool) -> Result<Arc<Section>> {
        if create {
            return Ok(self.section_or_insert(name));
        }
        self.lookup(name).ok_or_else(|| Error::SectionNotFound {
            section: name.to_owned(),
        })
    }

    /// Returns an existing section, for example to hand a subsystem its own
    /// namespace of settings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SectionNotFound`] if no such section exists.
    pub fn get_section(&self, name: &str) -> Result<Arc<Section>> {
        self.get_or_create_section(name, false)
    }

    /// Creates a new, empty section.
    ///
    /// Unlike [`Settings::set`], this never reuses an existing section.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateSection`] if the name is already taken.
    ///
    /// # Panics
    ///
    /// Panics if the internal registry lock is poisoned.
    pub fn add_section(&self, name: &str) -> Result<Arc<Section>> {
        let mut sections = self.sections.write().expect("settings registry poisoned");
        if sections.contains_key(name) {
            return Err(Error::DuplicateSection {
                section: name.to_owned(),
            });
        }

        let section = Arc::new(Section::new());
        sections.insert(name.to_owned(), Arc::clone(&section));
        debug!(section = name, "settings section added");
        Ok(section)
    }

    /// Removes a named section and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RootSection`] for the root section and
    /// [`Error::SectionNotFound`] if no such section exists.
    ///
    /// # Panics
    ///
    /// Panics if the internal registry lock is poisoned.
    pub fn remove_section(&self, name: &str) -> Result<Arc<Section>> {
        if name == ROOT_SECTION {
            return Err(Error::RootSection);
        }
        let mut sections = self.sections.write().expect("settings registry poisoned");
        sections.remove(name).ok_or_else(|| Error::SectionNotFound {
            section: name.to_owned(),
        })
    }

    /// Returns all section names, root included, in sorted order.
    ///
    /// # Panics
    ///
    /// Panics if the internal registry lock is poisoned.
    #[must_use]
    pub fn section_names(&self) -> Vec<String> {
        let sections = self.sections.read().expect("settings registry poisoned");
        sections.keys().cloned().collect()
    }

    /// Returns `true` if a section with the given name exists.
    #[must_use]
    pub fn has_section(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    /// Returns the root section.
    #[must_use]
    pub fn root(&self) -> Arc<Section> {
        self.section_or_insert(ROOT_SECTION)
    }

    /// Returns a string setting.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SectionNotFound`] or [`Error::KeyNotFound`].
    pub fn get(&self, section: &str, key: &str) -> Result<String> {
        self.get_section(section)?
            .get(key)
            .map_err(|err| err.in_section(section))
    }

    /// Returns an integer setting.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SectionNotFound`], [`Error::KeyNotFound`] or
    /// [`Error::InvalidInteger`].
    pub fn get_int(&self, section: &str, key: &str) -> Result<i64> {
        self.get_section(section)?
            .get_int(key)
            .map_err(|err| err.in_section(section))
    }

    /// Returns a boolean setting.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SectionNotFound`] or [`Error::KeyNotFound`].
    pub fn get_bool(&self, section: &str, key: &str) -> Result<bool> {
        self.get_section(section)?
            .get_bool(key)
            .map_err(|err| err.in_section(section))
    }

    /// Returns a list setting.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SectionNotFound`] or [`Error::KeyNotFound`].
    pub fn get_string_list(&self, section: &str, key: &str) -> Result<Vec<String>> {
        self.get_section(section)?
            .get_string_list(key)
            .map_err(|err| err.in_section(section))
    }

    /// Stores a typed setting, creating the section if needed.
    pub fn set(&self, section: &str, key: impl Into<String>, input: impl Into<ValueInput>) {
        self.section_or_insert(section).set(key, input);
    }

    /// Removes a setting, returning whether it was present.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SectionNotFound`] if the section does not exist.
    pub fn delete(&self, section: &str, key: &str) -> Result<bool> {
        Ok(self.get_section(section)?.delete(key))
    }

    /// Serialises all settings in the INI-like text form.
    #[must_use]
    pub fn render(&self) -> String {
        format::render(self)
    }

    fn read_file(path: &Path) -> Result<(Self, LoadSummary)> {
        let load_error = |source: std::io::Error| Error::Load {
            path: path.to_path_buf(),
            source,
        };

        let file = File::open(path).map_err(load_error)?;
        let staged = Self::stage(BufReader::new(file)).map_err(load_error)?;
        debug!(path = %path.display(), values = staged.1.values, "settings file loaded");
        Ok(staged)
    }

    /// Parses a whole input into fresh settings, so a failed read never
    /// reaches a live store.
    fn stage<R: BufRead>(reader: R) -> std::io::Result<(Self, LoadSummary)> {
        let staged = Self::new();
        let summary = format::load_into(&staged, reader)?;
        Ok((staged, summary))
    }

    fn merge(&self, staged: &Self) {
        for (name, section) in staged.snapshot() {
            let target = self.section_or_insert(&name);
            for value in section.values() {
                target.insert(value);
            }
        }
    }

    pub(crate) fn section_or_insert(&self, name: &str) -> Arc<Section> {
        if let Some(section) = self.lookup(name) {
            return section;
        }

        // Another thread may have inserted it since the read lock was dropped.
        let mut sections = self.sections.write().expect("settings registry poisoned");
        let section = sections
            .entry(name.to_owned())
            .or_insert_with(|| Arc::new(Section::new()));
        Arc::clone(section)
    }

    /// Clones the registry so callers can walk sections without holding the
    /// registry lock.
    pub(crate) fn snapshot(&self) -> Vec<(String, Arc<Section>)> {
        let sections = self.sections.read().expect("settings registry poisoned");
        sections
            .iter()
            .map(|(name, section)| (name.clone(), Arc::clone(section)))
            .collect()
    }

    fn lookup(&self, name: &str) -> Option<Arc<Section>> {
        let sections = self.sections.read().expect("settings registry poisoned");
        sections.get(name).cloned()
    }
}

impl fmt::Display for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl FromStr for Settings {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self> {
        let settings = Self::new();
        settings.load_from_reader(text.as_bytes())?;
        Ok(settings)
    }
}
