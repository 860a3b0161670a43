//! The output of every builder: a clause plus its positional values.

use crate::param::ParamList;
use serde::Serialize;
use serde_json::Value;

/// A SQL clause body (`SET` or `WHERE` contents) and the values bound to it.
///
/// The `n`th value binds to placeholder `$n` in [`clause`](Self::clause).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SqlFragment {
    clause: String,
    values: Vec<Value>,
}

impl SqlFragment {
    pub(crate) fn new(clause: String, values: Vec<Value>) -> Self {
        Self { clause, values }
    }

    /// The clause body, without a leading keyword.
    pub fn clause(&self) -> &str {
        &self.clause
    }

    /// Values in placeholder order.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// `true` if there is no clause to splice in.
    ///
    /// A filter fragment can be empty while still carrying values
    /// (see [`UnknownKeys::Bind`](crate::UnknownKeys::Bind)).
    pub fn is_empty(&self) -> bool {
        self.clause.is_empty()
    }

    /// The placeholder that follows the last bound value.
    ///
    /// Used to append more parameters after the fragment, e.g.
    /// `UPDATE companies SET {clause} WHERE handle = {next}`.
    pub fn next_placeholder(&self) -> String {
        format!("${}", self.values.len() + 1)
    }

    /// The clause with a leading keyword (`" WHERE ..."`), or `""` if empty.
    pub fn prefixed(&self, keyword: &str) -> String {
        if self.is_empty() {
            String::new()
        } else {
            format!(" {keyword} {}", self.clause)
        }
    }

    /// Values converted into tokio-postgres parameters.
    pub fn params(&self) -> ParamList {
        self.values.iter().collect()
    }

    /// Split into `(clause, values)`.
    pub fn into_parts(self) -> (String, Vec<Value>) {
        (self.clause, self.values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn placeholders_follow_values() {
        let frag = SqlFragment::new(r#""name"=$1"#.into(), vec![json!("Acme")]);
        assert_eq!(frag.next_placeholder(), "$2");
        assert_eq!(frag.params().len(), 1);
        assert_eq!(
            format!(
                "UPDATE companies SET {} WHERE handle = {}",
                frag.clause(),
                frag.next_placeholder()
            ),
            r#"UPDATE companies SET "name"=$1 WHERE handle = $2"#
        );
    }

    #[test]
    fn empty_fragment_has_no_prefix() {
        let frag = SqlFragment::default();
        assert!(frag.is_empty());
        assert_eq!(frag.prefixed("WHERE"), "");
        assert_eq!(frag.next_placeholder(), "$1");
    }

    #[test]
    fn prefixed_and_parts() {
        let frag = SqlFragment::new("num_employees >= $1".into(), vec![json!(10)]);
        assert_eq!(frag.prefixed("WHERE"), " WHERE num_employees >= $1");
        let (clause, values) = frag.into_parts();
        assert_eq!(clause, "num_employees >= $1");
        assert_eq!(values, vec![json!(10)]);
    }

    #[test]
    fn serializes_as_clause_and_values() {
        let frag = SqlFragment::new("a = $1".into(), vec![json!(1)]);
        assert_eq!(
            serde_json::to_value(&frag).unwrap(),
            json!({"clause": "a = $1", "values": [1]})
        );
    }
}
