//! Optional presence on top of any codec
//!
//! An optional group is absent exactly when every one of its cells is empty.
//! A consequence: an optional text or character field cannot carry a
//! present empty string; `Some("")` serializes to an empty cell and parses
//! back as absent.

use super::errors::{CodecError, CodecResult};
use super::traits::{Codec, SharedCodec};
use super::value::Value;

/// Wraps an inner codec without changing its width.
#[derive(Debug, Clone)]
pub struct OptionalCodec {
    inner: SharedCodec,
}

impl OptionalCodec {
    /// Wraps `inner`
    pub fn new(inner: SharedCodec) -> Self {
        Self { inner }
    }

    /// Returns the wrapped codec
    pub fn inner(&self) -> &SharedCodec {
        &self.inner
    }
}

impl Codec for OptionalCodec {
    fn width(&self) -> usize {
        self.inner.width()
    }

    fn type_name(&self) -> String {
        format!("Option<{}>", self.inner.type_name())
    }

    fn parse(&self, cells: &[&str]) -> CodecResult<Value> {
        if cells.len() != self.width() {
            return Err(CodecError::option_group(self.inner.type_name(), cells));
        }

        if cells.iter().all(|cell| cell.is_empty()) {
            return Ok(Value::absent());
        }

        self.inner.parse(cells).map(Value::present)
    }

    fn serialize(&self, value: &Value) -> CodecResult<Vec<String>> {
        match value {
            Value::Optional(None) => Ok(vec![String::new(); self.width()]),
            Value::Optional(Some(inner)) => self.inner.serialize(inner),
            other => Err(CodecError::value_mismatch(self.type_name(), other.kind())),
        }
    }

    fn header(&self) -> Vec<String> {
        self.inner.header()
    }
}
