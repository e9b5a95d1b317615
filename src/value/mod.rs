//! Text to value coercion for scalar and composite field types.

mod composite;
mod error;
mod scalar;

use std::fmt;

use serde::Serialize;

pub use composite::{parse_mapping, parse_sequence, FieldValue};
pub use error::CoerceError;
pub use scalar::Scalar;

/// The closed set of scalar kinds a field, sequence element or mapping
/// key/value may have.
///
/// `Int` and `Uint` store platform-width integers but only accept literals
/// that fit in 32 bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalarKind {
    Text,
    Bool,
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Float32,
    Float64,
}

impl ScalarKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Int8 => "int8",
            Self::Int16 => "int16",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Uint => "uint",
            Self::Uint8 => "uint8",
            Self::Uint16 => "uint16",
            Self::Uint32 => "uint32",
            Self::Uint64 => "uint64",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
        }
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The declared shape of a destination field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Scalar(ScalarKind),
    Sequence(ScalarKind),
    Mapping { key: ScalarKind, value: ScalarKind },
    /// Any type outside the scalar/sequence/mapping set. Binding leaves such
    /// fields untouched.
    Other(&'static str),
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(kind) => write!(f, "{kind}"),
            Self::Sequence(kind) => write!(f, "[{kind}]"),
            Self::Mapping { key, value } => write!(f, "{{{key}: {value}}}"),
            Self::Other(name) => f.write_str(name),
        }
    }
}

/// A coerced scalar, tagged with its kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Bool(bool),
    Int(isize),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Uint(usize),
    Uint8(u8),
    Uint16(u16),
    Uint32(u32),
    Uint64(u64),
    Float32(f32),
    Float64(f64),
}

impl Value {
    pub fn kind(&self) -> ScalarKind {
        match self {
            Self::Text(_) => ScalarKind::Text,
            Self::Bool(_) => ScalarKind::Bool,
            Self::Int(_) => ScalarKind::Int,
            Self::Int8(_) => ScalarKind::Int8,
            Self::Int16(_) => ScalarKind::Int16,
            Self::Int32(_) => ScalarKind::Int32,
            Self::Int64(_) => ScalarKind::Int64,
            Self::Uint(_) => ScalarKind::Uint,
            Self::Uint8(_) => ScalarKind::Uint8,
            Self::Uint16(_) => ScalarKind::Uint16,
            Self::Uint32(_) => ScalarKind::Uint32,
            Self::Uint64(_) => ScalarKind::Uint64,
            Self::Float32(_) => ScalarKind::Float32,
            Self::Float64(_) => ScalarKind::Float64,
        }
    }
}

/// Coerces `text` into a value of the given kind.
///
/// This is the dynamic counterpart of [`Scalar::coerce`]; both share the same
/// parsing rules.
pub fn coerce(kind: ScalarKind, text: &str) -> Result<Value, CoerceError> {
    let value = match kind {
        ScalarKind::Text => Value::Text(String::coerce(text)?),
        ScalarKind::Bool => Value::Bool(bool::coerce(text)?),
        ScalarKind::Int => Value::Int(isize::coerce(text)?),
        ScalarKind::Int8 => Value::Int8(i8::coerce(text)?),
        ScalarKind::Int16 => Value::Int16(i16::coerce(text)?),
        ScalarKind::Int32 => Value::Int32(i32::coerce(text)?),
        ScalarKind::Int64 => Value::Int64(i64::coerce(text)?),
        ScalarKind::Uint => Value::Uint(usize::coerce(text)?),
        ScalarKind::Uint8 => Value::Uint8(u8::coerce(text)?),
        ScalarKind::Uint16 => Value::Uint16(u16::coerce(text)?),
        ScalarKind::Uint32 => Value::Uint32(u32::coerce(text)?),
        ScalarKind::Uint64 => Value::Uint64(u64::coerce(text)?),
        ScalarKind::Float32 => Value::Float32(f32::coerce(text)?),
        ScalarKind::Float64 => Value::Float64(f64::coerce(text)?),
    };
    Ok(value)
}
