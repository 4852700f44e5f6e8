//! Width-aware CSV codecs
//!
//! Leaves convert one cell, optionals add "all cells empty means absent"
//! on top of any codec, and records compose an ordered field list into a
//! single codec whose width is the sum of its fields.
//!
//! # Invariants
//!
//! - Parse succeeds only when the supplied cell count equals the width
//! - Serialize always emits exactly width cells
//! - Codecs are immutable after construction and safe to share

mod errors;
mod leaf;
mod optional;
mod record;
mod traits;
mod value;

pub use errors::{CodecError, CodecResult};
pub use leaf::{is_valid_date_format, LeafCodec, DEFAULT_DATE_FORMAT};
pub use optional::OptionalCodec;
pub use record::{FieldDescriptor, RecordCodec, CELL_SEPARATOR};
pub use traits::{Codec, SharedCodec};
pub use value::Value;
