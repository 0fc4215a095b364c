//! Literal values and their AQL text form.
//!
//! [`AqlValue`] is the closed set of shapes that can be inlined into a query.
//! [`Operand`] says explicitly whether a token is a variable reference, a bind
//! parameter reference, or a literal, so nothing is decided by inspecting
//! types at run time.

use std::fmt::Write;

use crate::error::{AqlError, AqlResult};
use crate::vocabulary::Keyword;

/// A literal value.
#[derive(Debug, Clone, PartialEq)]
pub enum AqlValue {
    Null,
    Bool(bool),
    Int(i64),
    /// Unsigned integers above `i64::MAX`, kept exact.
    UInt(u64),
    Float(f64),
    String(String),
    List(Vec<AqlValue>),
    /// Key/value pairs, rendered in insertion order.
    Object(Vec<(String, AqlValue)>),
}

impl AqlValue {
    /// Build an object literal from key/value pairs.
    pub fn object<K, V, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<AqlValue>,
    {
        AqlValue::Object(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Render this value as AQL literal text.
    pub fn to_aql(&self) -> AqlResult<String> {
        let mut out = String::new();
        self.write_aql(&mut out)?;
        Ok(out)
    }

    fn write_aql(&self, out: &mut String) -> AqlResult<()> {
        match self {
            AqlValue::Null => out.push_str("null"),
            AqlValue::Bool(b) => {
                let _ = write!(out, "{}", b);
            }
            AqlValue::Int(n) => {
                let _ = write!(out, "{}", n);
            }
            AqlValue::UInt(n) => {
                let _ = write!(out, "{}", n);
            }
            AqlValue::Float(n) => {
                if !n.is_finite() {
                    return Err(AqlError::invalid_literal(format!(
                        "{} has no AQL number form",
                        n
                    )));
                }
                let _ = write!(out, "{}", n);
            }
            AqlValue::String(s) => write_quoted(s, out),
            AqlValue::List(items) => {
                out.push('[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    item.write_aql(out)?;
                }
                out.push(']');
            }
            AqlValue::Object(pairs) => {
                out.push('{');
                for (i, (key, value)) in pairs.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    write_key(key, out)?;
                    out.push_str(": ");
                    value.write_aql(out)?;
                }
                out.push('}');
            }
        }
        Ok(())
    }
}

/// Convert a value to its AQL literal text.
pub fn serialize(value: &AqlValue) -> AqlResult<String> {
    value.to_aql()
}

/// `[A-Za-z_][A-Za-z0-9_]*`
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

fn write_quoted(s: &str, out: &mut String) {
    out.push('\'');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('\'');
}

fn write_key(key: &str, out: &mut String) -> AqlResult<()> {
    if key.is_empty() {
        return Err(AqlError::invalid_literal("object key must not be empty"));
    }
    if is_identifier(key) && !Keyword::is_reserved(key) {
        out.push_str(key);
    } else {
        write_quoted(key, out);
    }
    Ok(())
}

impl From<bool> for AqlValue {
    fn from(b: bool) -> Self {
        AqlValue::Bool(b)
    }
}

impl From<i32> for AqlValue {
    fn from(n: i32) -> Self {
        AqlValue::Int(n as i64)
    }
}

impl From<i64> for AqlValue {
    fn from(n: i64) -> Self {
        AqlValue::Int(n)
    }
}

impl From<u32> for AqlValue {
    fn from(n: u32) -> Self {
        AqlValue::Int(n as i64)
    }
}

impl From<u64> for AqlValue {
    fn from(n: u64) -> Self {
        match i64::try_from(n) {
            Ok(i) => AqlValue::Int(i),
            Err(_) => AqlValue::UInt(n),
        }
    }
}

impl From<usize> for AqlValue {
    fn from(n: usize) -> Self {
        AqlValue::from(n as u64)
    }
}

impl From<f64> for AqlValue {
    fn from(n: f64) -> Self {
        AqlValue::Float(n)
    }
}

impl From<&str> for AqlValue {
    fn from(s: &str) -> Self {
        AqlValue::String(s.to_string())
    }
}

impl From<String> for AqlValue {
    fn from(s: String) -> Self {
        AqlValue::String(s)
    }
}

impl<T: Into<AqlValue>> From<Vec<T>> for AqlValue {
    fn from(items: Vec<T>) -> Self {
        AqlValue::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<AqlValue>> From<Option<T>> for AqlValue {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => AqlValue::Null,
        }
    }
}

impl From<serde_json::Value> for AqlValue {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => AqlValue::Null,
            serde_json::Value::Bool(b) => AqlValue::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    AqlValue::Int(i)
                } else if let Some(u) = n.as_u64() {
                    AqlValue::UInt(u)
                } else {
                    AqlValue::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => AqlValue::String(s),
            serde_json::Value::Array(items) => {
                AqlValue::List(items.into_iter().map(AqlValue::from).collect())
            }
            serde_json::Value::Object(map) => AqlValue::Object(
                map.into_iter()
                    .map(|(k, v)| (k, AqlValue::from(v)))
                    .collect(),
            ),
        }
    }
}

/// The right-hand side of a comparison or a standalone value.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// A declared variable or attribute path, emitted bare.
    Var(String),
    /// A bind parameter, emitted as `@name`.
    Param(String),
    /// A literal, emitted through the literal serializer.
    Literal(AqlValue),
}

impl Operand {
    pub fn var(name: impl Into<String>) -> Self {
        Operand::Var(name.into())
    }

    pub fn param(name: impl Into<String>) -> Self {
        Operand::Param(name.into())
    }

    pub fn literal(value: impl Into<AqlValue>) -> Self {
        Operand::Literal(value.into())
    }
}

impl From<AqlValue> for Operand {
    fn from(v: AqlValue) -> Self {
        Operand::Literal(v)
    }
}

macro_rules! operand_from_literal {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Operand {
                fn from(v: $ty) -> Self {
                    Operand::Literal(AqlValue::from(v))
                }
            }
        )*
    };
}

operand_from_literal!(&str, String, bool, i32, i64, u32, u64, usize, f64);

impl<T: Into<AqlValue>> From<Vec<T>> for Operand {
    fn from(items: Vec<T>) -> Self {
        Operand::Literal(AqlValue::from(items))
    }
}

impl<T: Into<AqlValue>> From<Option<T>> for Operand {
    fn from(opt: Option<T>) -> Self {
        Operand::Literal(AqlValue::from(opt))
    }
}
