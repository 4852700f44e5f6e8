//! Record composition
//!
//! A `RecordCodec` stitches an ordered list of named field codecs into one
//! codec. Parsing walks the fields in declared order with a cursor into the
//! cell slice, handing each field exactly its width; the first failing field
//! aborts the parse and its error is returned unchanged.
//!
//! Header flattening: a width-1 field contributes its own name, a wider field
//! contributes its codec's header. Nested names are not prefixed and the
//! composite field's own name is dropped.

use super::errors::{CodecError, CodecResult};
use super::traits::{Codec, SharedCodec};
use super::value::Value;

/// Separator used when joining serialized cells into a line
pub const CELL_SEPARATOR: &str = ",";

/// A named field and the codec resolved for it
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    /// Field name, used for the header
    pub name: String,
    /// Codec for the field's type
    pub codec: SharedCodec,
}

impl FieldDescriptor {
    /// Creates a field descriptor
    pub fn new(name: impl Into<String>, codec: SharedCodec) -> Self {
        Self {
            name: name.into(),
            codec,
        }
    }
}

/// Codec for a whole structured value.
///
/// Width is the sum of its field widths and may be 0 for a record without
/// fields.
#[derive(Debug, Clone)]
pub struct RecordCodec {
    name: String,
    fields: Vec<FieldDescriptor>,
    width: usize,
}

impl RecordCodec {
    /// Composes the fields in the given order
    pub fn new(name: impl Into<String>, fields: Vec<FieldDescriptor>) -> Self {
        let width = fields.iter().map(|f| f.codec.width()).sum();
        Self {
            name: name.into(),
            fields,
            width,
        }
    }

    /// Record type name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Field descriptors in declared order
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Serializes a record into one comma-joined line.
    ///
    /// No quoting is applied; a cell containing a comma will not read back.
    pub fn serialize_line(&self, value: &Value) -> CodecResult<String> {
        let cells = self.serialize(value)?;
        Ok(cells.join(CELL_SEPARATOR))
    }
}

impl Codec for RecordCodec {
    fn width(&self) -> usize {
        self.width
    }

    fn type_name(&self) -> String {
        self.name.clone()
    }

    fn parse(&self, cells: &[&str]) -> CodecResult<Value> {
        if cells.len() != self.width {
            return Err(CodecError::width_mismatch(self.width, cells.len()));
        }

        let mut values = Vec::with_capacity(self.fields.len());
        let mut rest = cells;
        for field in &self.fields {
            let (group, tail) = rest.split_at(field.codec.width());
            values.push(field.codec.parse(group)?);
            rest = tail;
        }

        Ok(Value::Record(values))
    }

    fn serialize(&self, value: &Value) -> CodecResult<Vec<String>> {
        let values = match value {
            Value::Record(values) if values.len() == self.fields.len() => values,
            other => return Err(CodecError::value_mismatch(&self.name, other.kind())),
        };

        let mut cells = Vec::with_capacity(self.width);
        for (field, value) in self.fields.iter().zip(values) {
            cells.extend(field.codec.serialize(value)?);
        }
        Ok(cells)
    }

    fn header(&self) -> Vec<String> {
        let mut header = Vec::with_capacity(self.width);
        for field in &self.fields {
            if field.codec.width() == 1 {
                header.push(field.name.clone());
            } else {
                header.extend(field.codec.header());
            }
        }
        header
    }
}
