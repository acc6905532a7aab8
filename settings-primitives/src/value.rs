//! Named setting values stored in canonical string form.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

const TRUE_LITERAL: &str = "TRUE";
const FALSE_LITERAL: &str = "FALSE";
const LIST_SEPARATOR: char = ',';
const LIST_JOINER: &str = ", ";

/// Typed input accepted when constructing a [`Value`].
///
/// Only the four supported kinds can be expressed, so passing an unsupported
/// type to a setter is rejected at compile time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ValueInput {
    /// Stored verbatim.
    Text(String),
    /// Rendered in base 10.
    Int(i64),
    /// Rendered in base 10; holds unsigned values above `i64::MAX`.
    UInt(u64),
    /// Rendered as `TRUE` or `FALSE`.
    Bool(bool),
    /// Rendered comma-and-space joined.
    List(Vec<String>),
}

impl ValueInput {
    fn into_canonical(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Int(int) => int.to_string(),
            Self::UInt(uint) => uint.to_string(),
            Self::Bool(true) => TRUE_LITERAL.to_owned(),
            Self::Bool(false) => FALSE_LITERAL.to_owned(),
            Self::List(items) => items.join(LIST_JOINER),
        }
    }
}

impl From<String> for ValueInput {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for ValueInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<&String> for ValueInput {
    fn from(value: &String) -> Self {
        Self::Text(value.clone())
    }
}

macro_rules! int_input {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for ValueInput {
                fn from(value: $ty) -> Self {
                    Self::Int(i64::from(value))
                }
            }
        )*
    };
}

int_input!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for ValueInput {
    fn from(value: u64) -> Self {
        i64::try_from(value).map_or(Self::UInt(value), Self::Int)
    }
}

impl From<usize> for ValueInput {
    fn from(value: usize) -> Self {
        u64::try_from(value).map_or_else(|_| Self::Text(value.to_string()), Self::from)
    }
}

impl From<isize> for ValueInput {
    fn from(value: isize) -> Self {
        i64::try_from(value).map_or_else(|_| Self::Text(value.to_string()), Self::Int)
    }
}

impl From<bool> for ValueInput {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Vec<String>> for ValueInput {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

impl From<Vec<&str>> for ValueInput {
    fn from(value: Vec<&str>) -> Self {
        Self::List(value.into_iter().map(str::to_owned).collect())
    }
}

impl From<&[&str]> for ValueInput {
    fn from(value: &[&str]) -> Self {
        Self::List(value.iter().map(|item| (*item).to_owned()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for ValueInput {
    fn from(value: [&str; N]) -> Self {
        Self::List(value.iter().map(|item| (*item).to_owned()).collect())
    }
}

/// A single named setting.
///
/// `raw` is always the canonical string; the typed views are derived on every
/// call. Values are immutable: updating a setting replaces its `Value`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Value {
    name: String,
    raw: String,
}

impl Value {
    /// Builds a value from typed input, rendering it into canonical form.
    ///
    /// ```
    /// use settings_primitives::Value;
    ///
    /// assert_eq!(Value::new("retries", 3).raw(), "3");
    /// assert_eq!(Value::new("verbose", true).raw(), "TRUE");
    /// assert_eq!(Value::new("hosts", ["a", "b", "c"]).raw(), "a, b, c");
    /// ```
    #[must_use]
    pub fn new(name: impl Into<String>, input: impl Into<ValueInput>) -> Self {
        Self {
            name: name.into(),
            raw: input.into().into_canonical(),
        }
    }

    /// Parses a `key = value` line, splitting on the first `=` only and
    /// trimming both halves.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedLine`] if the line contains no `=`.
    pub fn parse_line(line: &str) -> Result<Self> {
        let (name, raw) = line.split_once('=').ok_or_else(|| Error::MalformedLine {
            line: line.to_owned(),
        })?;
        Ok(Self {
            name: name.trim().to_owned(),
            raw: raw.trim().to_owned(),
        })
    }

    /// Returns the setting name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the canonical string form.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Returns the value as a string (the canonical form itself).
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Parses the value as a base-10 integer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInteger`] if the canonical form is not an
    /// integer literal. There is no fallback value.
    pub fn as_int(&self) -> Result<i64> {
        self.raw.parse().map_err(|_| Error::InvalidInteger {
            key: self.name.clone(),
            raw: self.raw.clone(),
        })
    }

    /// Interprets the value as a boolean.
    ///
    /// Only `""`, `"0"` and a case-insensitive `"false"` are false; any other
    /// text is true.
    #[must_use]
    pub fn as_bool(&self) -> bool {
        !(self.raw.is_empty() || self.raw == "0" || self.raw.eq_ignore_ascii_case("false"))
    }

    /// Splits the value on `,` and trims each element.
    ///
    /// An empty value yields a single empty element.
    #[must_use]
    pub fn as_string_list(&self) -> Vec<String> {
        self.raw
            .split(LIST_SEPARATOR)
            .map(|item| item.trim().to_owned())
            .collect()
    }

    /// Formats the value as a `name = raw` line, without a line terminator.
    #[must_use]
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.name, self.raw)
    }
}

impl FromStr for Value {
    type Err = Error;

    fn from_str(line: &str) -> Result<Self> {
        Self::parse_line(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(raw: &str) -> Value {
        Value::new("key", raw)
    }

    #[test]
    fn canonical_forms() {
        assert_eq!(Value::new("s", "plain text").raw(), "plain text");
        assert_eq!(Value::new("i", -42).raw(), "-42");
        assert_eq!(Value::new("u", 7_u32).raw(), "7");
        assert_eq!(Value::new("t", true).raw(), "TRUE");
        assert_eq!(Value::new("f", false).raw(), "FALSE");
        assert_eq!(
            Value::new("l", vec!["a".to_owned(), "b".to_owned()]).raw(),
            "a, b"
        );
        assert_eq!(Value::new("e", Vec::<String>::new()).raw(), "");
    }

    #[test]
    fn wide_integers_render_in_base_10() {
        let items = vec![1, 2, 3];
        assert_eq!(Value::new("len", items.len()).as_int().unwrap(), 3);
        assert_eq!(Value::new("offset", -5_isize).raw(), "-5");
        assert_eq!(Value::new("big", 42_u64).as_int().unwrap(), 42);
        assert_eq!(Value::new("max", u64::MAX).raw(), "18446744073709551615");
        assert!(Value::new("max", u64::MAX).as_int().is_err());
        assert_eq!(ValueInput::from(7_u64), ValueInput::Int(7));
        assert_eq!(ValueInput::from(u64::MAX), ValueInput::UInt(u64::MAX));
    }

    #[test]
    fn parse_line_splits_on_first_equals() {
        let value = Value::parse_line("  url = http://host/?a=b  ").unwrap();
        assert_eq!(value.name(), "url");
        assert_eq!(value.raw(), "http://host/?a=b");

        let empty = Value::parse_line("BoolValue3 =").unwrap();
        assert_eq!(empty.name(), "BoolValue3");
        assert_eq!(empty.raw(), "");
    }

    #[test]
    fn parse_line_without_equals_fails() {
        let err = Value::parse_line("just some words").expect_err("no separator");
        assert!(matches!(err, Error::MalformedLine { line } if line == "just some words"));
        assert!("also bad".parse::<Value>().is_err());
    }

    #[test]
    fn as_int_parses_or_fails() {
        assert_eq!(raw("2398").as_int().unwrap(), 2398);
        assert_eq!(raw("-17").as_int().unwrap(), -17);

        let err = raw("SomeText").as_int().expect_err("not an integer");
        assert!(matches!(err, Error::InvalidInteger { key, raw } if key == "key" && raw == "SomeText"));
        assert!(raw("").as_int().is_err());
        assert!(raw("1.5").as_int().is_err());
    }

    #[test]
    fn as_bool_is_permissive() {
        for falsy in ["", "0", "false", "FALSE", "False"] {
            assert!(!raw(falsy).as_bool(), "{falsy:?} should be false");
        }
        for truthy in ["1", "yes", "SomeText", "TRUE", "no", "00"] {
            assert!(raw(truthy).as_bool(), "{truthy:?} should be true");
        }
    }

    #[test]
    fn as_string_list_trims_elements() {
        assert_eq!(raw("a, b, c").as_string_list(), ["a", "b", "c"]);
        assert_eq!(raw("a,b ,  c").as_string_list(), ["a", "b", "c"]);
        assert_eq!(raw("single").as_string_list(), ["single"]);
        assert_eq!(raw("").as_string_list(), [""]);
    }

    #[test]
    fn render_formats_line() {
        assert_eq!(Value::new("IntValue", 2398).render(), "IntValue = 2398");
        assert_eq!(Value::new("Empty", "").to_string(), "Empty = ");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serializes_name_and_canonical_form() {
        let json = serde_json::to_value(Value::new("debug", false)).unwrap();
        assert_eq!(json, serde_json::json!({ "name": "debug", "raw": "FALSE" }));
    }
}
