// src/rows/reader.rs
// =============================================================================
// This module turns the input file into a stream of (url, identifier) pairs.
//
// How it works:
// 1. The csv crate splits each line into fields using the sniffed delimiter
// 2. clean_row() trims the fields, strips stray ';' and drops empty ones
// 3. A row is accepted only if exactly two fields survive and the first one
//    looks like a URL (starts with "http")
// 4. The first row may be a header; HeaderMode decides whether to drop it
//
// Bad rows never stop the batch. They are yielded as RowInvalid errors so the
// pipeline can report them next to the records that did work.
//
// Row numbers are file line numbers. The csv crate silently skips blank
// lines, so we recover the real line from the record's byte offset.
//
// Rust concepts:
// - Iterator trait: Rows is lazy, one record is parsed per next() call
// - Option/Result: A row is either a record or a reason it was rejected
// =============================================================================

use crate::config::HeaderMode;
use crate::error::RecordError;
use csv::{Position, ReaderBuilder, StringRecordsIntoIter};
use std::fs;
use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

// One valid line of the input file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputRecord {
    /// Page to download (starts with "http")
    pub url: String,
    /// Base name of the output file
    pub identifier: String,
}

// A row as seen by the pipeline: the 1-based line it starts on plus either
// the record or why it was rejected
#[derive(Debug)]
pub struct ParsedRow {
    pub number: usize,
    pub record: Result<InputRecord, RecordError>,
}

// Cleans up one row of fields
//
// Returns: Some(record) if exactly two non-empty fields remain and the first
// starts with "http", otherwise None
//
// Example:
//   ["  http://a.com ", "doc1;", ""] -> Some(("http://a.com", "doc1"))
//   ["not-a-url", "id2"]             -> None
pub fn clean_row(fields: &[&str]) -> Option<InputRecord> {
    let cleaned: Vec<&str> = fields
        .iter()
        .map(|field| field.trim().trim_end_matches(';').trim_end())
        .filter(|field| !field.is_empty())
        .collect();

    match cleaned.as_slice() {
        [url, identifier] if url.starts_with("http") => Some(InputRecord {
            url: url.to_string(),
            identifier: identifier.to_string(),
        }),
        _ => None,
    }
}

// Lazy reader over the rows of an input file
pub struct Rows {
    // URL lists are small, so the whole file is kept to map offsets to lines
    data: Arc<[u8]>,
    records: StringRecordsIntoIter<Cursor<Arc<[u8]>>>,
    header: HeaderMode,
    // Line of the last row handed out
    number: usize,
    seen_first: bool,
    finished: bool,
}

impl Rows {
    // Opens a file for reading with an already-known delimiter
    pub fn open(path: &Path, delimiter: u8, header: HeaderMode) -> csv::Result<Rows> {
        let data: Arc<[u8]> = fs::read(path)?.into();

        // has_headers(false): we decide about the first row ourselves
        // flexible(true): rows with a different number of fields are not an error
        let reader = ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(false)
            .flexible(true)
            .from_reader(Cursor::new(Arc::clone(&data)));

        Ok(Rows {
            data,
            records: reader.into_records(),
            header,
            number: 0,
            seen_first: false,
            finished: false,
        })
    }

    // Line a record really starts on
    //
    // csv stamps a record with the position where it started looking, which
    // is before any blank lines it skipped. Those newlines are counted here.
    fn line_of(&self, position: Option<&Position>) -> usize {
        let Some(position) = position else {
            return self.number + 1;
        };

        let start = usize::try_from(position.byte()).unwrap_or(usize::MAX);
        let skipped = self
            .data
            .get(start..)
            .unwrap_or_default()
            .iter()
            .take_while(|&&b| b == b'\n' || b == b'\r')
            .filter(|&&b| b == b'\n')
            .count();

        position.line() as usize + skipped
    }

    // Should the first row be thrown away?
    //
    // `looks_like_data` is None when the csv crate could not decode the row
    fn is_header(&self, looks_like_data: Option<bool>) -> bool {
        match self.header {
            HeaderMode::Present => true,
            HeaderMode::Absent => false,
            HeaderMode::Auto => looks_like_data == Some(false),
        }
    }
}

impl Iterator for Rows {
    type Item = ParsedRow;

    fn next(&mut self) -> Option<ParsedRow> {
        loop {
            if self.finished {
                return None;
            }

            let next = self.records.next()?;
            let number = match &next {
                Ok(fields) => self.line_of(fields.position()),
                Err(e) => self.line_of(e.position()),
            };
            self.number = number;

            let (record, looks_like_data) = match next {
                Ok(fields) => {
                    let fields: Vec<&str> = fields.iter().collect();
                    match clean_row(&fields) {
                        Some(record) => (Ok(record), Some(true)),
                        None => (
                            Err(RecordError::RowInvalid(format!(
                                "expected a URL and an identifier, got {:?}",
                                fields
                            ))),
                            Some(false),
                        ),
                    }
                }
                Err(e) => {
                    // After an I/O error the underlying reader is unusable
                    if e.is_io_error() {
                        self.finished = true;
                    }
                    (Err(RecordError::RowInvalid(e.to_string())), None)
                }
            };

            let first = !self.seen_first;
            self.seen_first = true;
            if first && self.is_header(looks_like_data) {
                debug!("Skipping header row {}: {:?}", number, record);
                continue;
            }

            return Some(ParsedRow { number, record });
        }
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is a slice pattern?
//    - `match cleaned.as_slice() { [url, identifier] => ... }` only matches
//      when the slice has exactly two elements
//    - The `if url.starts_with("http")` part is a match guard
//
// 2. Why implement Iterator ourselves?
//    - The pipeline can pull one row at a time instead of loading the file
//    - `loop` + `continue` lets us silently drop the header row
//
// 3. What does `?` do inside next()?
//    - In a function returning Option, `?` returns None early when the
//      inner iterator is exhausted
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_input(content: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content).unwrap();
        file
    }

    fn collect(content: &str, delimiter: u8, header: HeaderMode) -> Vec<ParsedRow> {
        collect_bytes(content.as_bytes(), delimiter, header)
    }

    fn collect_bytes(content: &[u8], delimiter: u8, header: HeaderMode) -> Vec<ParsedRow> {
        let file = write_input(content);
        Rows::open(file.path(), delimiter, header).unwrap().collect()
    }

    #[test]
    fn test_clean_row_accepts_url_and_identifier() {
        let record = clean_row(&["http://example.com/a", "doc1"]).unwrap();
        assert_eq!(record.url, "http://example.com/a");
        assert_eq!(record.identifier, "doc1");
    }

    #[test]
    fn test_clean_row_trims_and_strips_semicolons() {
        let record = clean_row(&["  https://example.com ", " doc2;;", "", "   "]).unwrap();
        assert_eq!(record.url, "https://example.com");
        assert_eq!(record.identifier, "doc2");
    }

    #[test]
    fn test_clean_row_drops_fields_that_were_only_semicolons() {
        let record = clean_row(&["http://a.com", "id", ";;"]).unwrap();
        assert_eq!(record.identifier, "id");
    }

    #[test]
    fn test_clean_row_rejects_non_url() {
        assert_eq!(clean_row(&["not-a-url", "id2"]), None);
    }

    #[test]
    fn test_clean_row_rejects_wrong_field_count() {
        assert_eq!(clean_row(&["http://a.com"]), None);
        assert_eq!(clean_row(&["http://a.com", "id", "extra"]), None);
        assert_eq!(clean_row(&[]), None);
    }

    #[test]
    fn test_header_is_skipped_in_auto_mode() {
        let rows = collect("url,id\nhttp://example.com/a,doc1\n", b',', HeaderMode::Auto);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].number, 2);
        let record = rows[0].record.as_ref().unwrap();
        assert_eq!(record.identifier, "doc1");
    }

    #[test]
    fn test_auto_mode_keeps_a_first_row_that_is_data() {
        let rows = collect(
            "http://example.com/a,doc1\nhttp://example.com/b,doc2\n",
            b',',
            HeaderMode::Auto,
        );
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].number, 1);
    }

    #[test]
    fn test_present_mode_always_drops_first_row() {
        let rows = collect(
            "http://example.com/a,doc1\nhttp://example.com/b,doc2\n",
            b',',
            HeaderMode::Present,
        );
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].record.as_ref().unwrap().identifier, "doc2");
    }

    #[test]
    fn test_absent_mode_reports_bad_first_row() {
        let rows = collect("url,id\nhttp://example.com/a,doc1\n", b',', HeaderMode::Absent);
        assert_eq!(rows.len(), 2);
        assert!(matches!(rows[0].record, Err(RecordError::RowInvalid(_))));
    }

    #[test]
    fn test_invalid_rows_do_not_stop_parsing() {
        let rows = collect(
            "url;id\nnot-a-url;id2\nhttp://example.com/c;doc3;\n",
            b';',
            HeaderMode::Auto,
        );
        assert_eq!(rows.len(), 2);
        assert!(matches!(rows[0].record, Err(RecordError::RowInvalid(_))));
        let record = rows[1].record.as_ref().unwrap();
        assert_eq!(record.url, "http://example.com/c");
        assert_eq!(record.identifier, "doc3");
    }

    #[test]
    fn test_semicolon_contamination_in_comma_file() {
        let rows = collect("url,id\nhttp://example.com/a;,doc1;\n", b',', HeaderMode::Auto);
        let record = rows[0].record.as_ref().unwrap();
        assert_eq!(record.url, "http://example.com/a");
        assert_eq!(record.identifier, "doc1");
    }

    #[test]
    fn test_undecodable_row_is_reported_and_parsing_continues() {
        let rows = collect_bytes(
            b"url,id\nhttp://a.com,\xff\xfe\nhttp://b.com,doc2\n",
            b',',
            HeaderMode::Auto,
        );
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].number, 2);
        assert!(matches!(rows[0].record, Err(RecordError::RowInvalid(_))));
        assert_eq!(rows[1].number, 3);
        let record = rows[1].record.as_ref().unwrap();
        assert_eq!(record.url, "http://b.com");
        assert_eq!(record.identifier, "doc2");
    }

    #[test]
    fn test_row_numbers_are_file_lines_across_blank_lines() {
        let rows = collect(
            "url,id\n\nhttp://example.com/a,doc1\n\n\r\n\nhttp://example.com/b,doc2\n",
            b',',
            HeaderMode::Auto,
        );
        let numbers: Vec<usize> = rows.iter().map(|row| row.number).collect();
        assert_eq!(numbers, vec![3, 7]);
    }

    #[test]
    fn test_auto_mode_checks_first_record_after_leading_blank_lines() {
        let rows = collect("\n\nurl,id\nhttp://example.com/a,doc1\n", b',', HeaderMode::Auto);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].number, 4);
    }
}
