//! Record schemas and codec derivation
//!
//! A record schema is an ordered list of named, typed fields. Derivation
//! resolves a codec for every field once, up front, and composes them into
//! a `RecordCodec`.
//!
//! # Design Principles
//!
//! - Resolution is explicit: overrides are passed into each derivation call
//! - The builtin codec table is never mutated
//! - Unresolvable types fail at derivation, never at parse time

mod derive;
mod errors;
mod loader;
mod registry;
mod types;

pub use derive::{derive_record, derive_with};
pub use errors::{SchemaError, SchemaResult};
pub use loader::{SchemaDocument, SchemaLoader};
pub use registry::{builtin_leaf, CodecOverrides, CodecRegistry, TypeKey};
pub use types::{FieldDef, FieldType, Primitive, RecordSchema};
