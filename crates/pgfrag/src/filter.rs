//! Filter `WHERE` clause builder.
//!
//! A [`FilterSpec`] lists the query keys it understands, the column each one
//! filters and how. Predicates are always emitted in the order of its fields, no
//! matter what order the keys arrive in; placeholders follow the order of the
//! bound values.
//!
//! # Example
//! ```
//! use pgfrag::sql_for_filtering_companies;
//! use serde_json::json;
//!
//! let frag = sql_for_filtering_companies(&json!({"nameLike": "net", "minEmployees": 10}))?;
//! assert_eq!(
//!     frag.clause(),
//!     "name ILIKE '%' || $1 || '%' AND num_employees >= $2"
//! );
//! assert_eq!(frag.values(), &[json!("net"), json!(10)]);
//! # Ok::<(), pgfrag::FragError>(())
//! ```

use crate::error::{FragError, FragResult, InputErrorKind};
use crate::fragment::SqlFragment;
use serde::Deserialize;
use serde_json::Value;

/// How a filter key constrains its column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Predicate {
    /// Case-insensitive substring match: `col ILIKE '%' || $n || '%'`
    Contains,
    /// Inclusive lower bound: `col >= $n`
    AtLeast,
    /// Inclusive upper bound: `col <= $n`
    AtMost,
}

impl Predicate {
    fn render(self, column: &str, pos: usize) -> String {
        match self {
            Self::Contains => format!("{column} ILIKE '%' || ${pos} || '%'"),
            Self::AtLeast => format!("{column} >= ${pos}"),
            Self::AtMost => format!("{column} <= ${pos}"),
        }
    }

    /// Type-check a value, turning numeric strings into integers for bounds.
    fn coerce(self, key: &str, value: &Value) -> FragResult<Value> {
        match self {
            Self::Contains => match value {
                Value::String(_) => Ok(value.clone()),
                _ => Err(FragError::invalid_input_msg(
                    InputErrorKind::Type,
                    format!("{key} must be a string"),
                )),
            },
            Self::AtLeast | Self::AtMost => {
                let n = match value {
                    Value::Number(n) => n.as_i64(),
                    Value::String(s) => s.trim().parse::<i64>().ok(),
                    _ => None,
                };
                n.map(Value::from).ok_or_else(|| {
                    FragError::invalid_input_msg(
                        InputErrorKind::Type,
                        format!("{key} must be an integer"),
                    )
                })
            }
        }
    }
}

/// One recognized filter key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterField {
    /// Query key, as sent by the client.
    pub key: &'static str,
    /// Column the predicate applies to. Trusted, emitted unquoted.
    pub column: &'static str,
    /// Comparison applied to the column.
    pub predicate: Predicate,
}

/// What to do with unrecognized query keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownKeys {
    /// Fail with [`InputErrorKind::UnknownField`].
    #[default]
    Reject,
    /// Drop them from the values.
    Ignore,
    /// Keep their values in the value list even though no predicate uses them.
    ///
    /// Placeholders then count every key, recognized or not.
    Bind,
}

/// Options for building filter clauses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterOptions {
    /// Unknown key handling. Default: [`UnknownKeys::Reject`].
    pub unknown_keys: UnknownKeys,
    /// Reject a lower bound greater than the upper bound on the same column.
    pub check_bounds: bool,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            unknown_keys: UnknownKeys::Reject,
            check_bounds: true,
        }
    }
}

impl FilterOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set unknown key handling.
    pub fn unknown_keys(mut self, policy: UnknownKeys) -> Self {
        self.unknown_keys = policy;
        self
    }

    /// Enable or disable the min/max bound check.
    pub fn check_bounds(mut self, enabled: bool) -> Self {
        self.check_bounds = enabled;
        self
    }
}

/// The set of keys a filter endpoint accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterSpec {
    fields: &'static [FilterField],
}

/// Company search: name substring and employee count bounds.
pub const COMPANY_FILTER: FilterSpec = FilterSpec::new(&[
    FilterField {
        key: "nameLike",
        column: "name",
        predicate: Predicate::Contains,
    },
    FilterField {
        key: "minEmployees",
        column: "num_employees",
        predicate: Predicate::AtLeast,
    },
    FilterField {
        key: "maxEmployees",
        column: "num_employees",
        predicate: Predicate::AtMost,
    },
]);

impl FilterSpec {
    /// Create a filter definition. Predicates are emitted in the order of `fields`.
    pub const fn new(fields: &'static [FilterField]) -> Self {
        Self { fields }
    }

    /// Recognized fields.
    pub fn fields(&self) -> &'static [FilterField] {
        self.fields
    }

    fn field_index(&self, key: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.key == key)
    }

    /// Build from a JSON object (query string already decoded), keeping key order.
    pub fn build_json(&self, query: &Value, options: &FilterOptions) -> FragResult<SqlFragment> {
        match query {
            Value::Object(map) => self.build(map.iter().map(|(k, v)| (k.as_str(), v)), options),
            _ => Err(FragError::invalid_input_msg(
                InputErrorKind::Shape,
                "Filter must be an object",
            )),
        }
    }

    /// Build from ordered `(key, value)` pairs.
    ///
    /// A `null` value counts as absent.
    pub fn build<'a>(
        &self,
        query: impl IntoIterator<Item = (&'a str, &'a Value)>,
        options: &FilterOptions,
    ) -> FragResult<SqlFragment> {
        let mut values: Vec<Value> = Vec::new();
        // 1-based placeholder for each recognized field
        let mut positions: Vec<Option<usize>> = vec![None; self.fields.len()];
        let mut seen = vec![false; self.fields.len()];

        for (key, value) in query {
            let Some(idx) = self.field_index(key) else {
                match options.unknown_keys {
                    UnknownKeys::Reject => {
                        return Err(FragError::invalid_input_msg(
                            InputErrorKind::UnknownField,
                            format!("Unknown filter: {key}"),
                        ));
                    }
                    UnknownKeys::Ignore => {
                        tracing::warn!(key, "ignoring unknown filter key");
                    }
                    UnknownKeys::Bind => values.push(value.clone()),
                }
                continue;
            };

            if std::mem::replace(&mut seen[idx], true) {
                return Err(FragError::invalid_input_msg(
                    InputErrorKind::Shape,
                    format!("Duplicate filter: {key}"),
                ));
            }

            if value.is_null() {
                if options.unknown_keys == UnknownKeys::Bind {
                    values.push(Value::Null);
                }
                continue;
            }

            values.push(self.fields[idx].predicate.coerce(key, value)?);
            positions[idx] = Some(values.len());
        }

        if options.check_bounds {
            self.check_bounds(&positions, &values)?;
        }

        let clause = self
            .fields
            .iter()
            .zip(&positions)
            .filter_map(|(field, pos)| pos.map(|p| field.predicate.render(field.column, p)))
            .collect::<Vec<_>>()
            .join(" AND ");

        tracing::debug!(clause = %clause, params = values.len(), "built filter");
        Ok(SqlFragment::new(clause, values))
    }

    fn check_bounds(&self, positions: &[Option<usize>], values: &[Value]) -> FragResult<()> {
        let bound = |i: usize| positions[i].and_then(|p| values[p - 1].as_i64());

        for (i, lo) in self.fields.iter().enumerate() {
            if lo.predicate != Predicate::AtLeast {
                continue;
            }
            for (j, hi) in self.fields.iter().enumerate() {
                if hi.predicate != Predicate::AtMost || hi.column != lo.column {
                    continue;
                }
                if let (Some(min), Some(max)) = (bound(i), bound(j)) {
                    if min > max {
                        return Err(FragError::invalid_input_msg(
                            InputErrorKind::Range,
                            format!("{} cannot be greater than {}", lo.key, hi.key),
                        ));
                    }
                }
            }
        }
        Ok(())
    }
}

/// Build a company search `WHERE` clause with default options.
pub fn sql_for_filtering_companies(query: &Value) -> FragResult<SqlFragment> {
    sql_for_filtering_companies_with(query, &FilterOptions::default())
}

/// Build a company search `WHERE` clause.
pub fn sql_for_filtering_companies_with(
    query: &Value,
    options: &FilterOptions,
) -> FragResult<SqlFragment> {
    COMPANY_FILTER.build_json(query, options)
}

/// Typed company search parameters, e.g. from a query-string extractor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CompanyFilter {
    pub name_like: Option<String>,
    pub min_employees: Option<i64>,
    pub max_employees: Option<i64>,
}

impl CompanyFilter {
    /// Build the `WHERE` clause. Values are bound in field order.
    pub fn to_fragment(&self) -> FragResult<SqlFragment> {
        let name_like = self.name_like.clone().map(Value::from);
        let min = self.min_employees.map(Value::from);
        let max = self.max_employees.map(Value::from);

        let pairs = [
            ("nameLike", name_like.as_ref()),
            ("minEmployees", min.as_ref()),
            ("maxEmployees", max.as_ref()),
        ];
        COMPANY_FILTER.build(
            pairs.into_iter().filter_map(|(k, v)| v.map(|v| (k, v))),
            &FilterOptions::default(),
        )
    }
}
