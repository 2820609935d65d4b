use crate::error::Result;
use crate::models::RawObservationRow;
use crate::readers::column_matcher::{ColumnMatcher, ResolvedColumns};
use crate::readers::layout::{decode_text, detect_delimiter, locate_header};
use crate::utils::constants::DEFAULT_HEADER_SCAN_LINES;
use crate::utils::settings::ReaderSettings;
use csv::{ReaderBuilder, StringRecord, Trim};
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Rows extracted from one CSV upload plus what was detected along the way.
#[derive(Debug, Clone, Serialize)]
pub struct ParsedTable {
    pub encoding: &'static str,
    pub header_line: usize,
    pub delimiter: char,
    pub columns: ResolvedColumns,
    pub rows: Vec<RawObservationRow>,
    pub skipped_records: usize,
}

/// Reads RP5-style wind observation exports.
pub struct WindCsvReader {
    matcher: ColumnMatcher,
    header_scan_lines: usize,
}

impl WindCsvReader {
    pub fn new() -> Self {
        Self {
            matcher: ColumnMatcher::rp5(),
            header_scan_lines: DEFAULT_HEADER_SCAN_LINES,
        }
    }

    pub fn with_matcher(mut self, matcher: ColumnMatcher) -> Self {
        self.matcher = matcher;
        self
    }

    pub fn with_header_scan_lines(mut self, lines: usize) -> Self {
        self.header_scan_lines = lines.max(1);
        self
    }

    pub fn from_settings(settings: &ReaderSettings) -> Self {
        Self::new()
            .with_matcher(ColumnMatcher::from_settings(settings))
            .with_header_scan_lines(settings.header_scan_lines)
    }

    /// Read and parse a CSV file from disk
    pub fn read_file(&self, path: &Path) -> Result<ParsedTable> {
        let bytes = fs::read(path)?;
        self.read_bytes(&bytes)
    }

    /// Parse an in-memory CSV upload
    pub fn read_bytes(&self, bytes: &[u8]) -> Result<ParsedTable> {
        let (text, encoding) = decode_text(bytes);
        let lines: Vec<&str> = text.lines().collect();

        // Comment lines may precede the header
        let scan_end = lines.len().min(self.header_scan_lines);
        let header_line = locate_header(
            &lines[..scan_end],
            &self.matcher.direction.key,
            &self.matcher.speed.key,
        );
        let delimiter = lines
            .get(header_line)
            .map(|line| detect_delimiter(line))
            .unwrap_or(';');

        debug!(
            encoding = encoding.name(),
            header_line,
            %delimiter,
            "detected CSV layout"
        );

        let body = lines.get(header_line..).unwrap_or_default().join("\n");
        let mut reader = ReaderBuilder::new()
            .delimiter(delimiter as u8)
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(body.as_bytes());

        let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();
        let columns = self.matcher.resolve(&headers)?;

        // resolve() returned names taken from `headers`, so both positions exist
        let direction_index = headers.iter().position(|h| *h == columns.direction);
        let speed_index = headers.iter().position(|h| *h == columns.speed);

        let mut rows = Vec::new();
        let mut skipped_records = 0;
        let mut record = StringRecord::new();

        loop {
            match reader.read_record(&mut record) {
                Ok(true) => rows.push(RawObservationRow::new(
                    field(&record, direction_index),
                    field(&record, speed_index),
                )),
                Ok(false) => break,
                Err(e) => {
                    skipped_records += 1;
                    warn!("Skipping malformed CSV record: {}", e);
                    if e.is_io_error() {
                        return Err(e.into());
                    }
                }
            }
        }

        Ok(ParsedTable {
            encoding: encoding.name(),
            header_line,
            delimiter,
            columns,
            rows,
            skipped_records,
        })
    }
}

impl Default for WindCsvReader {
    fn default() -> Self {
        Self::new()
    }
}

fn field(record: &StringRecord, index: Option<usize>) -> String {
    index
        .and_then(|i| record.get(i))
        .unwrap_or_default()
        .to_string()
}
