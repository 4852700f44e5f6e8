//! Splitting text into lines and cells
//!
//! No quoting or escaping: every comma is a separator, so a value holding a
//! literal comma cannot be represented.

use crate::codec::{Codec, CodecResult, RecordCodec, Value, CELL_SEPARATOR};

const LOG_TARGET: &str = "csvderive::driver";

/// Splits one line into cells
pub fn split_cells(line: &str) -> Vec<&str> {
    line.split(CELL_SEPARATOR).collect()
}

/// Returns the record lines of `text`, dropping the first line if `has_header`.
///
/// Lines end at `\n` or `\r\n`; a trailing line terminator does not start
/// another record.
pub fn record_lines(text: &str, has_header: bool) -> impl Iterator<Item = &str> {
    text.lines().skip(usize::from(has_header))
}

/// Applies `parse` to the cells of every record line.
///
/// Returns one result per retained line, in input order. A failing line
/// never affects the result of another.
pub fn parse_lines<T, F>(text: &str, has_header: bool, parse: F) -> Vec<CodecResult<T>>
where
    F: Fn(&[&str]) -> CodecResult<T>,
{
    record_lines(text, has_header)
        .enumerate()
        .map(|(index, line)| {
            let result = parse(&split_cells(line));
            if let Err(e) = &result {
                log::trace!(target: LOG_TARGET, "Record {} rejected: {}", index + 1, e);
            }
            result
        })
        .collect()
}

/// Parses every record line with an untyped record codec
pub fn parse_values(codec: &RecordCodec, text: &str, has_header: bool) -> Vec<CodecResult<Value>> {
    parse_lines(text, has_header, |cells| codec.parse(cells))
}
