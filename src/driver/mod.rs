//! Line driver: text to lines to cells to records
//!
//! Input is newline-delimited with comma-delimited cells and no quoting.
//! Each retained line is parsed independently.

mod lines;
mod reader;

pub use lines::{parse_lines, parse_values, record_lines, split_cells};
pub use reader::CsvDriver;
