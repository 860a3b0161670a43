//! Column name quoting.
//!
//! SET clauses emit every column as a quoted identifier (`"first_name"`), so
//! camelCase fallbacks keep their case. Quoted names allow any characters except
//! NUL; an embedded `"` is escaped as `""`.

use crate::error::{FragError, FragResult, InputErrorKind};

/// Quote a column name for use in generated SQL.
pub fn quote_ident(name: &str) -> FragResult<String> {
    if name.is_empty() {
        return Err(FragError::invalid_input_msg(
            InputErrorKind::Identifier,
            "Column name cannot be empty",
        ));
    }
    if name.contains('\0') {
        return Err(FragError::invalid_input_msg(
            InputErrorKind::Identifier,
            format!("Column name cannot contain NUL character: {name:?}"),
        ));
    }

    let mut out = String::with_capacity(name.len() + 2);
    out.push('"');
    for c in name.chars() {
        if c == '"' {
            out.push('"');
        }
        out.push(c);
    }
    out.push('"');
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_simple() {
        assert_eq!(quote_ident("first_name").unwrap(), r#""first_name""#);
        assert_eq!(quote_ident("firstName").unwrap(), r#""firstName""#);
    }

    #[test]
    fn quote_escapes_double_quote() {
        assert_eq!(quote_ident(r#"we"ird"#).unwrap(), r#""we""ird""#);
    }

    #[test]
    fn quote_rejects_empty_and_nul() {
        let err = quote_ident("").unwrap_err();
        assert_eq!(err.kind(), Some(InputErrorKind::Identifier));
        assert!(quote_ident("a\0b").is_err());
    }
}
