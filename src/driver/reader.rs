//! Typed line driver

use crate::codec::{CodecResult, CELL_SEPARATOR};
use crate::record::{CsvRecord, TypedCodec};

use super::lines::parse_lines;

/// Parses and writes whole CSV texts of one record type.
#[derive(Debug, Clone)]
pub struct CsvDriver<R> {
    codec: TypedCodec<R>,
    has_header: bool,
}

impl<R: CsvRecord> CsvDriver<R> {
    /// Creates a driver; input is assumed to carry a header line
    pub fn new(codec: TypedCodec<R>) -> Self {
        Self {
            codec,
            has_header: true,
        }
    }

    /// Sets whether the first input line is a header to discard
    pub fn with_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }

    /// Returns the underlying codec
    pub fn codec(&self) -> &TypedCodec<R> {
        &self.codec
    }

    /// Parses `text`, one result per record line in input order
    pub fn parse(&self, text: &str) -> Vec<CodecResult<R>> {
        parse_lines(text, self.has_header, |cells| self.codec.parse(cells))
    }

    /// Returns the header line
    pub fn header_line(&self) -> String {
        self.codec.header().join(CELL_SEPARATOR)
    }

    /// Serializes records into `\n`-terminated lines, preceded by the header
    /// line when the driver is configured with one
    pub fn write<'r, I>(&self, records: I) -> CodecResult<String>
    where
        I: IntoIterator<Item = &'r R>,
        R: 'r,
    {
        self.serialize_all(records, self.has_header)
    }

    /// Serializes records into `\n`-terminated lines, preceded by the header
    /// line if `with_header`
    pub fn serialize_all<'r, I>(&self, records: I, with_header: bool) -> CodecResult<String>
    where
        I: IntoIterator<Item = &'r R>,
        R: 'r,
    {
        let mut out = String::new();
        if with_header {
            out.push_str(&self.header_line());
            out.push('\n');
        }
        for record in records {
            out.push_str(&self.codec.serialize(record)?);
            out.push('\n');
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    crate::csv_record! {
        #[derive(Debug, Clone, PartialEq)]
        struct Row {
            name: String,
            score: Option<i16>,
        }
    }

    fn driver() -> CsvDriver<Row> {
        CsvDriver::new(TypedCodec::derive().unwrap())
    }

    #[test]
    fn test_parse_with_header() {
        let results = driver().parse("name,score\nann,7\nbob,\n");
        assert_eq!(
            results,
            vec![
                Ok(Row { name: "ann".into(), score: Some(7) }),
                Ok(Row { name: "bob".into(), score: None }),
            ]
        );
    }

    #[test]
    fn test_parse_without_header() {
        let results = driver().with_header(false).parse("name,score\nann,7");
        assert_eq!(results.len(), 2);
        assert_eq!(
            results[0].as_ref().unwrap_err().to_string(),
            "Cannot parse [score] to Short"
        );
    }

    #[test]
    fn test_write_then_parse() {
        let rows = vec![
            Row { name: "ann".into(), score: Some(-3) },
            Row { name: "bob".into(), score: None },
        ];
        let d = driver();
        let text = d.write(&rows).unwrap();
        assert_eq!(text, "name,score\nann,-3\nbob,\n");
        let parsed: Vec<Row> = d.parse(&text).into_iter().map(Result::unwrap).collect();
        assert_eq!(parsed, rows);
    }

    #[test]
    fn test_serialize_all_without_header() {
        let rows = vec![Row { name: "cy".into(), score: Some(1) }];
        assert_eq!(driver().serialize_all(&rows, false).unwrap(), "cy,1\n");
    }

    #[test]
    fn test_empty_text_has_no_records() {
        assert!(driver().parse("").is_empty());
        assert!(driver().parse("name,score\n").is_empty());
    }

    #[test]
    fn test_interior_empty_line_is_a_record() {
        let results = driver().with_header(false).parse("ann,1\n\nbob,2\n");
        assert_eq!(results.len(), 3);
        assert_eq!(
            results[1].as_ref().unwrap_err().to_string(),
            "Input size [1] does not match parser expected size [2]"
        );
        assert!(results[2].is_ok());
    }
}
