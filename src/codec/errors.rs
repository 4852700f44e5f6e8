//! Parse-time and serialize-time codec errors
//!
//! Every failure carries the exact message text reported to callers:
//! - `Input size [n] does not match parser expected size [w]`
//! - `Cannot parse [cell] to Type`
//! - `Cannot parse [cells] to Option<Type>`

use thiserror::Error;

/// Result type for codec operations
pub type CodecResult<T> = Result<T, CodecError>;

/// Codec failures
///
/// The first failing field of a record is reported unchanged; errors are
/// never accumulated across fields.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Cell count differs from the codec width
    #[error("Input size [{actual}] does not match parser expected size [{expected}]")]
    WidthMismatch {
        /// Width of the codec
        expected: usize,
        /// Number of cells supplied
        actual: usize,
    },

    /// A single cell could not be converted to a primitive
    #[error("Cannot parse [{raw}] to {type_name}")]
    LeafConversion {
        /// Name of the target type
        type_name: String,
        /// The raw cell text
        raw: String,
    },

    /// An optional group had the wrong number of cells
    #[error("Cannot parse [{raw}] to Option<{type_name}>")]
    OptionGroup {
        /// Name of the wrapped type
        type_name: String,
        /// The supplied cells, comma-joined
        raw: String,
    },

    /// A value handed to `serialize` does not have the codec's shape
    #[error("Cannot serialize {actual} value as {expected}")]
    ValueMismatch {
        /// Type the codec serializes
        expected: String,
        /// Kind of the supplied value
        actual: String,
    },
}

impl CodecError {
    /// Width mismatch between supplied cells and codec width
    pub fn width_mismatch(expected: usize, actual: usize) -> Self {
        Self::WidthMismatch { expected, actual }
    }

    /// Leaf conversion failure for a raw cell
    pub fn leaf(type_name: impl Into<String>, raw: impl Into<String>) -> Self {
        Self::LeafConversion {
            type_name: type_name.into(),
            raw: raw.into(),
        }
    }

    /// Optional group failure; cells are joined with a comma
    pub fn option_group(type_name: impl Into<String>, cells: &[&str]) -> Self {
        Self::OptionGroup {
            type_name: type_name.into(),
            raw: cells.join(","),
        }
    }

    /// Serialize was handed a value of the wrong kind
    pub fn value_mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::ValueMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_width_mismatch_message() {
        let err = CodecError::width_mismatch(3, 2);
        assert_eq!(
            err.to_string(),
            "Input size [2] does not match parser expected size [3]"
        );
    }

    #[test]
    fn test_leaf_message() {
        let err = CodecError::leaf("Int", "3.14");
        assert_eq!(err.to_string(), "Cannot parse [3.14] to Int");
    }

    #[test]
    fn test_option_group_joins_cells() {
        let err = CodecError::option_group("Address", &["a", "", "c"]);
        assert_eq!(err.to_string(), "Cannot parse [a,,c] to Option<Address>");
    }
}
