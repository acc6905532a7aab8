//! INI-like text format: line classification, loading and rendering.
//!
//! ```text
//! key1 = value1
//! key2 = value2, value3
//!
//! [ SectionName ]
//! key3 = value4
//! ```

use std::io::BufRead;

use settings_primitives::Value;
use tracing::{debug, warn};

use crate::settings::{ROOT_SECTION, Settings};

/// Lines shorter than this many characters are skipped while loading.
///
/// This filters blank and near-empty lines, and also drops genuine two
/// character lines such as `k=`.
pub const MIN_LINE_LEN: usize = 3;

const COMMENT_PREFIXES: [char; 2] = ['#', ';'];

/// Classification of one input line.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Line<'a> {
    /// Comment or too short to carry a setting.
    Skip,
    /// `[ name ]` header opening a section.
    Header(&'a str),
    /// Anything else, expected to be `key = value`.
    Entry(&'a str),
}

impl<'a> Line<'a> {
    pub(crate) fn classify(line: &'a str) -> Self {
        let line = line.strip_suffix('\r').unwrap_or(line);
        if line.starts_with(COMMENT_PREFIXES) || line.chars().count() < MIN_LINE_LEN {
            return Self::Skip;
        }
        if line.trim_start().starts_with('[') {
            return Self::Header(
                line.trim_matches(|c: char| matches!(c, '[' | ']') || c.is_whitespace()),
            );
        }
        Self::Entry(line)
    }
}

/// Counters reported after a load.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LoadSummary {
    /// Settings stored.
    pub values: usize,
    /// Section headers seen.
    pub sections: usize,
    /// Malformed lines skipped with a warning.
    pub skipped: usize,
}

/// Reads lines from `reader` into `settings`, tracking the current section.
///
/// The cursor starts at the root section. Headers create their section
/// immediately, so a section with no entries still survives the load.
/// Bytes that are not valid UTF-8 are decoded lossily rather than failing
/// the load.
pub(crate) fn load_into<R: BufRead>(
    settings: &Settings,
    mut reader: R,
) -> std::io::Result<LoadSummary> {
    let mut summary = LoadSummary::default();
    let mut current = settings.root();
    let mut buf = Vec::new();
    let mut index = 0_usize;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        index += 1;
        let line = String::from_utf8_lossy(&buf);
        let line = line.strip_suffix('\n').unwrap_or(&line);
        match Line::classify(line) {
            Line::Skip => {}
            Line::Header(name) => {
                current = settings.section_or_insert(name);
                summary.sections += 1;
            }
            Line::Entry(entry) => match Value::parse_line(entry) {
                Ok(value) => {
                    current.insert(value);
                    summary.values += 1;
                }
                Err(err) => {
                    warn!(line_number = index, %err, "skipping settings line");
                    summary.skipped += 1;
                }
            },
        }
    }

    debug!(
        values = summary.values,
        sections = summary.sections,
        skipped = summary.skipped,
        "settings loaded"
    );
    Ok(summary)
}

/// Renders the root section unlabeled, then every named section under a
/// `[ name ]` header, separated by blank lines.
pub(crate) fn render(settings: &Settings) -> String {
    let mut out = format!("{}\n", settings.root());
    for (name, section) in settings.snapshot() {
        if name != ROOT_SECTION {
            out.push_str(&format!("[ {name} ]\n{section}\n"));
        }
    }
    out
}
