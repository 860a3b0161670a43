//! Application field name → storage column name translation.

use heck::ToSnakeCase;
use serde::Deserialize;
use std::borrow::Cow;
use std::collections::BTreeMap;

/// What to emit for a field that has no entry in the table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Fallback {
    /// Use the field name unchanged.
    #[default]
    Verbatim,
    /// Derive the column by converting the field name to snake_case.
    SnakeCase,
}

/// A fixed mapping from application field names to column names.
///
/// # Example
/// ```
/// use pgfrag::NameTranslation;
///
/// let t = NameTranslation::new()
///     .map("numEmployees", "num_employees")
///     .map("logoUrl", "logo_url");
///
/// assert_eq!(t.column("numEmployees"), "num_employees");
/// assert_eq!(t.column("name"), "name");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameTranslation {
    columns: BTreeMap<String, String>,
    fallback: Fallback,
}

impl NameTranslation {
    /// Create an empty table (every field maps to itself).
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field → column entry.
    ///
    /// An empty column counts as no entry: the field falls back like an
    /// unmapped one.
    pub fn map(mut self, field: impl Into<String>, column: impl Into<String>) -> Self {
        self.columns.insert(field.into(), column.into());
        self
    }

    /// Set the fallback for fields without an entry.
    pub fn with_fallback(mut self, fallback: Fallback) -> Self {
        self.fallback = fallback;
        self
    }

    /// The configured fallback.
    pub fn fallback(&self) -> Fallback {
        self.fallback
    }

    /// Column name for a field.
    pub fn column<'a>(&'a self, field: &'a str) -> Cow<'a, str> {
        match self.columns.get(field) {
            Some(column) if !column.is_empty() => Cow::Borrowed(column.as_str()),
            _ => match self.fallback {
                Fallback::Verbatim => Cow::Borrowed(field),
                Fallback::SnakeCase => Cow::Owned(field.to_snake_case()),
            },
        }
    }

    /// Number of explicit entries.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Check if the table has no explicit entries.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl<F: Into<String>, C: Into<String>> FromIterator<(F, C)> for NameTranslation {
    fn from_iter<I: IntoIterator<Item = (F, C)>>(iter: I) -> Self {
        Self {
            columns: iter
                .into_iter()
                .map(|(f, c)| (f.into(), c.into()))
                .collect(),
            fallback: Fallback::Verbatim,
        }
    }
}
