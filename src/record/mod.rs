//! Typed records on top of the dynamic codecs
//!
//! Record types implement [`CsvRecord`] (normally via [`csv_record!`](crate::csv_record)),
//! supplying their field list, a constructor taking field values in declared
//! order and a destructor producing them. [`TypedCodec`] derives the record
//! codec once and converts parsed values into the concrete type.

mod traits;
mod typed;

pub use traits::{CsvRecord, CsvValue};
pub use typed::TypedCodec;
