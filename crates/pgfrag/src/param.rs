//! Binding fragment values to tokio-postgres parameters.
//!
//! Fragment values are JSON values (they usually come straight from a request
//! body or query string). Each one is bound through [`JsonParam`], which picks
//! its wire encoding from the placeholder type Postgres infers for it:
//!
//! | JSON | Postgres |
//! |------|----------|
//! | string | `TEXT`, `VARCHAR`, `BPCHAR`, `NAME` |
//! | integer | `INT2`, `INT4`, `INT8` (range checked), `FLOAT4`, `FLOAT8`, `NUMERIC` |
//! | float | `FLOAT4`, `FLOAT8`, `NUMERIC` |
//! | bool | `BOOL` |
//! | null | any type |
//! | array / object | `JSON`, `JSONB` |

use bytes::BytesMut;
use rust_decimal::Decimal;
use serde_json::{Number, Value};
use std::error::Error;
use std::str::FromStr;
use std::sync::Arc;
use tokio_postgres::types::{IsNull, ToSql, Type, WrongType};

type BoxError = Box<dyn Error + Sync + Send>;

/// A JSON value bound as a query parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonParam(pub Value);

impl JsonParam {
    /// Check whether this value can be encoded as `ty`.
    pub fn accepts_value(&self, ty: &Type) -> bool {
        match &self.0 {
            Value::Null => true,
            Value::Bool(_) => <bool as ToSql>::accepts(ty),
            Value::Number(n) if n.is_f64() => {
                matches!(*ty, Type::FLOAT4 | Type::FLOAT8 | Type::NUMERIC)
            }
            Value::Number(_) => matches!(
                *ty,
                Type::INT2 | Type::INT4 | Type::INT8 | Type::FLOAT4 | Type::FLOAT8 | Type::NUMERIC
            ),
            Value::String(_) => <String as ToSql>::accepts(ty),
            Value::Array(_) | Value::Object(_) => <Value as ToSql>::accepts(ty),
        }
    }
}

fn out_of_range(n: &Number, ty: &Type) -> BoxError {
    format!("value {n} is out of range for type {ty}").into()
}

fn number_to_sql(n: &Number, ty: &Type, out: &mut BytesMut) -> Result<IsNull, BoxError> {
    match *ty {
        Type::INT2 => {
            let v = n.as_i64().and_then(|i| i16::try_from(i).ok());
            v.ok_or_else(|| out_of_range(n, ty))?.to_sql(ty, out)
        }
        Type::INT4 => {
            let v = n.as_i64().and_then(|i| i32::try_from(i).ok());
            v.ok_or_else(|| out_of_range(n, ty))?.to_sql(ty, out)
        }
        Type::INT8 => n.as_i64().ok_or_else(|| out_of_range(n, ty))?.to_sql(ty, out),
        Type::FLOAT4 => {
            let v = n.as_f64().ok_or_else(|| out_of_range(n, ty))?;
            (v as f32).to_sql(ty, out)
        }
        Type::FLOAT8 => n.as_f64().ok_or_else(|| out_of_range(n, ty))?.to_sql(ty, out),
        Type::NUMERIC => {
            // Number's Display is the shortest exact text form; floats may use exponents.
            let text = n.to_string();
            let d = Decimal::from_str(&text)
                .or_else(|_| Decimal::from_scientific(&text))
                .map_err(|_| out_of_range(n, ty))?;
            d.to_sql(ty, out)
        }
        _ => Err(Box::new(WrongType::new::<JsonParam>(ty.clone()))),
    }
}

impl ToSql for JsonParam {
    fn to_sql(&self, ty: &Type, out: &mut BytesMut) -> Result<IsNull, BoxError> {
        match &self.0 {
            Value::Null => Ok(IsNull::Yes),
            Value::Bool(b) => b.to_sql(ty, out),
            Value::Number(n) => number_to_sql(n, ty, out),
            Value::String(s) => s.to_sql(ty, out),
            Value::Array(_) | Value::Object(_) => self.0.to_sql(ty, out),
        }
    }

    // The real check depends on the value; see `to_sql_checked`.
    fn accepts(_ty: &Type) -> bool {
        true
    }

    fn to_sql_checked(&self, ty: &Type, out: &mut BytesMut) -> Result<IsNull, BoxError> {
        if !self.accepts_value(ty) {
            return Err(Box::new(WrongType::new::<JsonParam>(ty.clone())));
        }
        self.to_sql(ty, out)
    }
}

/// A clone-friendly parameter wrapper using Arc.
#[derive(Clone)]
pub struct Param(pub(crate) Arc<dyn ToSql + Send + Sync>);

impl Param {
    /// Create a new parameter from any ToSql value.
    pub fn new<T: ToSql + Send + Sync + 'static>(value: T) -> Self {
        Param(Arc::new(value))
    }

    /// Bind a JSON value; see [`JsonParam`].
    pub fn from_json(value: &Value) -> Self {
        Param::new(JsonParam(value.clone()))
    }

    /// Get a reference to the inner value as a ToSql trait object.
    pub fn as_ref(&self) -> &(dyn ToSql + Sync) {
        &*self.0 as &(dyn ToSql + Sync)
    }
}

impl std::fmt::Debug for Param {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Param").field(&self.0).finish()
    }
}

/// Positional parameters in `$1, $2, ...` order.
#[derive(Clone, Debug, Default)]
pub struct ParamList {
    params: Vec<Param>,
}

impl ParamList {
    /// Create a new empty parameter list.
    pub fn new() -> Self {
        Self { params: Vec::new() }
    }

    /// Add a parameter and return its 1-based index.
    pub fn push<T: ToSql + Send + Sync + 'static>(&mut self, value: T) -> usize {
        self.params.push(Param::new(value));
        self.params.len()
    }

    /// Add a pre-wrapped Param and return its 1-based index.
    pub fn push_param(&mut self, param: Param) -> usize {
        self.params.push(param);
        self.params.len()
    }

    /// Get the current parameter count.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Get all parameters as references for tokio-postgres.
    pub fn as_refs(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.params.iter().map(|p| p.as_ref()).collect()
    }
}

impl<'a> FromIterator<&'a Value> for ParamList {
    fn from_iter<I: IntoIterator<Item = &'a Value>>(iter: I) -> Self {
        Self {
            params: iter.into_iter().map(Param::from_json).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn encode(value: Value, ty: &Type) -> Result<(IsNull, BytesMut), BoxError> {
        let param = Param::from_json(&value);
        let mut buf = BytesMut::new();
        let is_null = param.as_ref().to_sql_checked(ty, &mut buf)?;
        Ok((is_null, buf))
    }

    fn accepts(value: Value, ty: &Type) -> bool {
        encode(value, ty).is_ok()
    }

    #[test]
    fn json_scalars_bind_to_native_types() {
        assert!(accepts(json!("Aliya"), &Type::TEXT));
        assert!(accepts(json!("Aliya"), &Type::VARCHAR));
        assert!(accepts(json!(32), &Type::INT8));
        assert!(accepts(json!(1.5), &Type::FLOAT8));
        assert!(accepts(json!(true), &Type::BOOL));
        assert!(!accepts(json!("32"), &Type::INT4));
        assert!(!accepts(json!(true), &Type::TEXT));
    }

    #[test]
    fn integers_narrow_to_column_width() {
        let (_, buf) = encode(json!(10), &Type::INT4).unwrap();
        assert_eq!(&buf[..], &10i32.to_be_bytes());

        let (_, buf) = encode(json!(-3), &Type::INT2).unwrap();
        assert_eq!(&buf[..], &(-3i16).to_be_bytes());

        assert!(accepts(json!(10), &Type::FLOAT8));
        assert!(!accepts(json!(40_000), &Type::INT2));
        assert!(!accepts(json!(i64::MAX), &Type::INT4));
        assert!(!accepts(json!(u64::MAX), &Type::INT8));
    }

    #[test]
    fn floats_do_not_bind_to_integers() {
        assert!(!accepts(json!(0.5), &Type::INT4));
        let (_, buf) = encode(json!(0.5), &Type::FLOAT4).unwrap();
        assert_eq!(&buf[..], &0.5f32.to_be_bytes());
    }

    #[test]
    fn numbers_bind_to_numeric() {
        assert!(accepts(json!(0.5), &Type::NUMERIC));
        assert!(accepts(json!(12), &Type::NUMERIC));
        assert!(accepts(json!(1e20), &Type::NUMERIC));
    }

    #[test]
    fn null_binds_to_any_type() {
        for ty in [Type::INT4, Type::TEXT, Type::NUMERIC, Type::BOOL, Type::JSONB] {
            let (is_null, buf) = encode(Value::Null, &ty).unwrap();
            assert!(matches!(is_null, IsNull::Yes), "{ty}");
            assert!(buf.is_empty());
        }
    }

    #[test]
    fn json_containers_bind_to_jsonb() {
        assert!(accepts(json!({"a": 1}), &Type::JSONB));
        assert!(accepts(json!([1, 2]), &Type::JSON));
        assert!(!accepts(json!([1, 2]), &Type::TEXT));
    }

    #[test]
    fn param_list_collects_in_order() {
        let values = [json!("net"), json!(10)];
        let params: ParamList = values.iter().collect();
        assert_eq!(params.len(), 2);
        assert_eq!(params.as_refs().len(), 2);
    }

    #[test]
    fn push_returns_one_based_index() {
        let mut params = ParamList::new();
        assert!(params.is_empty());
        assert_eq!(params.push("c1"), 1);
        assert_eq!(params.push_param(Param::new(5i64)), 2);
    }
}
