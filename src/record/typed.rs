//! Record codecs bound to a concrete Rust type

use std::fmt;
use std::marker::PhantomData;

use crate::codec::{Codec, CodecResult, RecordCodec};
use crate::schema::{derive_with, CodecOverrides, SchemaResult};

use super::traits::CsvRecord;

/// A derived record codec that parses into and serializes from `R`.
///
/// Derive once and reuse; the codec is immutable and can be shared across
/// threads.
pub struct TypedCodec<R> {
    codec: RecordCodec,
    _record: PhantomData<fn() -> R>,
}

impl<R> fmt::Debug for TypedCodec<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedCodec").field("codec", &self.codec).finish()
    }
}

impl<R> Clone for TypedCodec<R> {
    fn clone(&self) -> Self {
        Self {
            codec: self.codec.clone(),
            _record: PhantomData,
        }
    }
}

impl<R: CsvRecord> TypedCodec<R> {
    /// Derives the codec for `R` from the builtin codecs
    pub fn derive() -> SchemaResult<Self> {
        Self::derive_with(&CodecOverrides::default())
    }

    /// Derives the codec for `R`, consulting `overrides` first
    pub fn derive_with(overrides: &CodecOverrides) -> SchemaResult<Self> {
        let codec = derive_with(&R::schema(), overrides)?;
        Ok(Self {
            codec,
            _record: PhantomData,
        })
    }

    /// Number of cells per record
    pub fn width(&self) -> usize {
        self.codec.width()
    }

    /// Flattened column names
    pub fn header(&self) -> Vec<String> {
        self.codec.header()
    }

    /// Parses exactly `width()` cells into a record
    pub fn parse(&self, cells: &[&str]) -> CodecResult<R> {
        R::from_value(self.codec.parse(cells)?)
    }

    /// Serializes a record into `width()` cells
    pub fn cells(&self, record: &R) -> CodecResult<Vec<String>> {
        self.codec.serialize(&record.to_value())
    }

    /// Serializes a record into one comma-joined line
    pub fn serialize(&self, record: &R) -> CodecResult<String> {
        self.codec.serialize_line(&record.to_value())
    }

    /// The untyped record codec
    pub fn codec(&self) -> &RecordCodec {
        &self.codec
    }
}
