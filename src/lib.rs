//! csvderive - CSV codecs derived from record field lists
//!
//! A record schema is turned into a `RecordCodec` once; the codec then maps
//! flat cell sequences to nested values and back.

pub mod cli;
pub mod codec;
pub mod driver;
pub mod observability;
pub mod record;
pub mod schema;

pub use codec::{Codec, CodecError, CodecResult, RecordCodec, Value};
pub use driver::CsvDriver;
pub use record::{CsvRecord, CsvValue, TypedCodec};
pub use schema::{derive_record, derive_with, CodecOverrides, RecordSchema, SchemaError};
