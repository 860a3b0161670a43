//! Partial-update `SET` clause builder.
//!
//! Turns the fields a client asked to change into `"col"=$1, "col2"=$2` plus the
//! values in the same order.
//!
//! # Example
//! ```
//! use pgfrag::{NameTranslation, sql_for_partial_update};
//! use serde_json::json;
//!
//! let translation = NameTranslation::new().map("firstName", "first_name");
//! let frag = sql_for_partial_update(&json!({"firstName": "Aliya", "age": 32}), &translation)?;
//!
//! assert_eq!(frag.clause(), r#""first_name"=$1, "age"=$2"#);
//! assert_eq!(frag.values(), &[json!("Aliya"), json!(32)]);
//! # Ok::<(), pgfrag::FragError>(())
//! ```

use crate::error::{FragError, FragResult, InputErrorKind};
use crate::fragment::SqlFragment;
use crate::ident::quote_ident;
use crate::translation::NameTranslation;
use serde_json::Value;

/// Ordered field → value pairs for a partial update.
///
/// Keys are unique. Setting a key again replaces its value but keeps its
/// original position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateFields {
    fields: Vec<(String, Value)>,
}

impl UpdateFields {
    /// Create an empty set of fields.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field.
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(field, value);
        self
    }

    /// Set a field in place.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        let field = field.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(f, _)| *f == field) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((field, value)),
        }
    }

    /// Read fields from a JSON object, keeping its key order.
    ///
    /// Anything other than an object (arrays included) is rejected.
    pub fn from_json(data: &Value) -> FragResult<Self> {
        match data {
            Value::Object(map) => Ok(Self {
                fields: map.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
            }),
            _ => Err(FragError::invalid_input(InputErrorKind::Shape)),
        }
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if there is nothing to update.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over fields in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(f, v)| (f.as_str(), v))
    }

    /// Build the `SET` clause body.
    pub fn build(&self, translation: &NameTranslation) -> FragResult<SqlFragment> {
        if self.fields.is_empty() {
            return Err(FragError::invalid_input(InputErrorKind::Empty));
        }

        let mut cols = Vec::with_capacity(self.fields.len());
        for (idx, (field, _)) in self.fields.iter().enumerate() {
            let column = quote_ident(&translation.column(field))?;
            cols.push(format!("{column}=${}", idx + 1));
        }

        let clause = cols.join(", ");
        let values: Vec<Value> = self.fields.iter().map(|(_, v)| v.clone()).collect();

        tracing::debug!(clause = %clause, params = values.len(), "built partial update");
        Ok(SqlFragment::new(clause, values))
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for UpdateFields {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut fields = Self::new();
        for (k, v) in iter {
            fields.insert(k, v);
        }
        fields
    }
}

/// Build a `SET` clause from a JSON object of fields to change.
///
/// Fails with [`InputErrorKind::Shape`] if `data` is not an object and with
/// [`InputErrorKind::Empty`] if it has no keys.
pub fn sql_for_partial_update(
    data: &Value,
    translation: &NameTranslation,
) -> FragResult<SqlFragment> {
    UpdateFields::from_json(data)?.build(translation)
}
