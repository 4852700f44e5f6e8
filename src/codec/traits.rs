//! The `Codec` contract shared by leaf, optional and record codecs

use std::fmt;
use std::sync::Arc;

use super::errors::CodecResult;
use super::value::Value;

/// A width-aware, stateless converter between cell groups and values.
///
/// Invariants every implementation upholds:
/// - `parse` succeeds only when `cells.len() == width()`
/// - `serialize` emits exactly `width()` cells
/// - `header().len() == width()` for record codecs and optionals over them;
///   leaves report an empty header because the containing record names them
pub trait Codec: fmt::Debug + Send + Sync {
    /// Number of cells consumed on parse and produced on serialize
    fn width(&self) -> usize;

    /// Type name used in error messages
    fn type_name(&self) -> String;

    /// Parses exactly `width()` cells
    fn parse(&self, cells: &[&str]) -> CodecResult<Value>;

    /// Serializes a value into exactly `width()` cells
    fn serialize(&self, value: &Value) -> CodecResult<Vec<String>>;

    /// Flattened column names contributed by this codec
    fn header(&self) -> Vec<String>;
}

/// A codec shared between records that embed it
pub type SharedCodec = Arc<dyn Codec>;
