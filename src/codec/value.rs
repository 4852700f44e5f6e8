//! Dynamic values flowing through codecs
//!
//! Record fields are heterogeneous, so codecs exchange a `Value` rather than
//! a concrete Rust type. A parsed record is a `Value::Record` holding its
//! field values in declared order.

use chrono::NaiveDate;

/// A parsed cell group.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// UTF-8 text
    Text(String),
    /// Single character
    Char(char),
    /// 8-bit signed integer
    Byte(i8),
    /// 16-bit signed integer
    Short(i16),
    /// 32-bit signed integer
    Int(i32),
    /// 64-bit signed integer
    Long(i64),
    /// 32-bit float
    Float(f32),
    /// 64-bit float
    Double(f64),
    /// Boolean
    Bool(bool),
    /// Calendar date
    Date(NaiveDate),
    /// Present or absent value of an optional field
    Optional(Option<Box<Value>>),
    /// Field values of a record, in declared order
    Record(Vec<Value>),
}

impl Value {
    /// Returns the kind name used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Text(_) => "String",
            Value::Char(_) => "Char",
            Value::Byte(_) => "Byte",
            Value::Short(_) => "Short",
            Value::Int(_) => "Int",
            Value::Long(_) => "Long",
            Value::Float(_) => "Float",
            Value::Double(_) => "Double",
            Value::Bool(_) => "Boolean",
            Value::Date(_) => "Date",
            Value::Optional(_) => "Option",
            Value::Record(_) => "Record",
        }
    }

    /// Absent optional value
    pub fn absent() -> Self {
        Value::Optional(None)
    }

    /// Present optional value
    pub fn present(inner: Value) -> Self {
        Value::Optional(Some(Box::new(inner)))
    }

    /// Returns the field values if this is a record
    pub fn as_record(&self) -> Option<&[Value]> {
        match self {
            Value::Record(fields) => Some(fields),
            _ => None,
        }
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Long(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Double(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}
