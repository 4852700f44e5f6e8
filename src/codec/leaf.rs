//! Single-cell codecs for primitive values
//!
//! Builtins: text, single character, signed integers (8/16/32/64 bit),
//! floating point (32/64 bit), boolean and date. The date leaf takes a
//! chrono format string; swap it by registering another date leaf before
//! derivation.

use std::fmt::{self, Write};
use std::sync::Arc;

use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;

use super::errors::{CodecError, CodecResult};
use super::traits::Codec;
use super::value::Value;

/// Default pattern of the builtin date leaf (`YYYY-MM-DD`)
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

type ParseFn = dyn Fn(&str) -> Option<Value> + Send + Sync;
type FormatFn = dyn Fn(&Value) -> Option<String> + Send + Sync;

/// A width-1 codec built from a conversion function and a stringifier.
#[derive(Clone)]
pub struct LeafCodec {
    type_name: String,
    parse_fn: Arc<ParseFn>,
    format_fn: Arc<FormatFn>,
}

impl fmt::Debug for LeafCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LeafCodec")
            .field("type_name", &self.type_name)
            .finish()
    }
}

impl LeafCodec {
    /// Creates a leaf from a conversion function and a stringifier.
    ///
    /// `parse` returns `None` when the cell cannot be converted; `format`
    /// returns `None` when handed a value of the wrong kind.
    pub fn new<P, F>(type_name: impl Into<String>, parse: P, format: F) -> Self
    where
        P: Fn(&str) -> Option<Value> + Send + Sync + 'static,
        F: Fn(&Value) -> Option<String> + Send + Sync + 'static,
    {
        Self {
            type_name: type_name.into(),
            parse_fn: Arc::new(parse),
            format_fn: Arc::new(format),
        }
    }

    /// Text leaf (identity)
    pub fn text() -> Self {
        Self::new(
            "String",
            |cell| Some(Value::Text(cell.to_string())),
            |value| match value {
                Value::Text(s) => Some(s.clone()),
                _ => None,
            },
        )
    }

    /// Single-character leaf; any other cell length fails
    pub fn character() -> Self {
        Self::new(
            "Char",
            |cell| {
                let mut chars = cell.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Some(Value::Char(c)),
                    _ => None,
                }
            },
            |value| match value {
                Value::Char(c) => Some(c.to_string()),
                _ => None,
            },
        )
    }

    /// 8-bit integer leaf
    pub fn byte() -> Self {
        Self::new(
            "Byte",
            |cell| cell.parse::<i8>().ok().map(Value::Byte),
            |value| match value {
                Value::Byte(v) => Some(v.to_string()),
                _ => None,
            },
        )
    }

    /// 16-bit integer leaf
    pub fn short() -> Self {
        Self::new(
            "Short",
            |cell| cell.parse::<i16>().ok().map(Value::Short),
            |value| match value {
                Value::Short(v) => Some(v.to_string()),
                _ => None,
            },
        )
    }

    /// 32-bit integer leaf
    pub fn int() -> Self {
        Self::new(
            "Int",
            |cell| cell.parse::<i32>().ok().map(Value::Int),
            |value| match value {
                Value::Int(v) => Some(v.to_string()),
                _ => None,
            },
        )
    }

    /// 64-bit integer leaf
    pub fn long() -> Self {
        Self::new(
            "Long",
            |cell| cell.parse::<i64>().ok().map(Value::Long),
            |value| match value {
                Value::Long(v) => Some(v.to_string()),
                _ => None,
            },
        )
    }

    /// 32-bit float leaf
    pub fn float() -> Self {
        Self::new(
            "Float",
            |cell| cell.parse::<f32>().ok().map(Value::Float),
            |value| match value {
                Value::Float(v) => Some(v.to_string()),
                _ => None,
            },
        )
    }

    /// 64-bit float leaf
    pub fn double() -> Self {
        Self::new(
            "Double",
            |cell| cell.parse::<f64>().ok().map(Value::Double),
            |value| match value {
                Value::Double(v) => Some(v.to_string()),
                _ => None,
            },
        )
    }

    /// Boolean leaf; only the literals `true` and `false` are accepted
    pub fn boolean() -> Self {
        Self::new(
            "Boolean",
            |cell| match cell {
                "true" => Some(Value::Bool(true)),
                "false" => Some(Value::Bool(false)),
                _ => None,
            },
            |value| match value {
                Value::Bool(b) => Some(b.to_string()),
                _ => None,
            },
        )
    }

    /// Date leaf using the default `YYYY-MM-DD` pattern
    pub fn date() -> Self {
        Self::date_with_format(DEFAULT_DATE_FORMAT)
    }

    /// Date leaf using a chrono format string.
    ///
    /// Validate user-supplied patterns with [`is_valid_date_format`] first;
    /// an invalid pattern makes every parse and serialize fail.
    pub fn date_with_format(format: impl Into<String>) -> Self {
        let format: Arc<str> = Arc::from(format.into());
        let parse_format = Arc::clone(&format);
        Self::new(
            "Date",
            move |cell| {
                NaiveDate::parse_from_str(cell, &parse_format)
                    .ok()
                    .map(Value::Date)
            },
            move |value| match value {
                Value::Date(d) => {
                    let mut out = String::new();
                    write!(out, "{}", d.format(&format)).ok()?;
                    Some(out)
                }
                _ => None,
            },
        )
    }

    /// Converts one cell
    pub fn parse_cell(&self, cell: &str) -> CodecResult<Value> {
        (self.parse_fn)(cell).ok_or_else(|| CodecError::leaf(&self.type_name, cell))
    }
}

impl Codec for LeafCodec {
    fn width(&self) -> usize {
        1
    }

    fn type_name(&self) -> String {
        self.type_name.clone()
    }

    fn parse(&self, cells: &[&str]) -> CodecResult<Value> {
        match cells {
            [cell] => self.parse_cell(cell),
            _ => Err(CodecError::width_mismatch(1, cells.len())),
        }
    }

    fn serialize(&self, value: &Value) -> CodecResult<Vec<String>> {
        (self.format_fn)(value)
            .map(|cell| vec![cell])
            .ok_or_else(|| CodecError::value_mismatch(&self.type_name, value.kind()))
    }

    fn header(&self) -> Vec<String> {
        Vec::new()
    }
}

/// Returns true if chrono accepts every item of the format string
pub fn is_valid_date_format(format: &str) -> bool {
    !format.is_empty() && StrftimeItems::new(format).all(|item| !matches!(item, Item::Error))
}
