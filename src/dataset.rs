//! In-memory tabular dataset parsed from uploaded CSV bytes.
//!
//! A [`Dataset`] is a header row plus ordered data rows. Cells are
//! trimmed; empty and whitespace-only cells are stored as `None`
//! (missing). The reader is strict: ragged rows and undecodable bytes
//! surface the underlying parser message instead of producing a
//! partial table.

use anyhow::{Context, Result, anyhow};
use encoding_rs::UTF_8;

pub const DEFAULT_CSV_DELIMITER: u8 = b',';

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    headers: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
}

impl Dataset {
    /// Parses raw uploaded bytes: strict UTF-8 decode, then CSV.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let text = decode_utf8(bytes)?;
        Self::from_csv_text(&text)
    }

    /// Parses CSV text with a header row into an in-memory table.
    pub fn from_csv_text(text: &str) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .delimiter(DEFAULT_CSV_DELIMITER)
            .double_quote(true)
            .flexible(false)
            .from_reader(text.as_bytes());

        let headers: Vec<String> = reader
            .headers()
            .context("Reading CSV header row")?
            .iter()
            .map(|field| field.to_string())
            .collect();
        if headers.is_empty() || headers.iter().all(|header| header.trim().is_empty()) {
            return Err(anyhow!("No columns to parse from input"));
        }

        let mut rows = Vec::new();
        for (row_idx, record) in reader.records().enumerate() {
            let record = record.with_context(|| format!("Reading row {}", row_idx + 2))?;
            let cells = record
                .iter()
                .map(|field| {
                    let trimmed = field.trim();
                    (!trimmed.is_empty()).then(|| trimmed.to_string())
                })
                .collect();
            rows.push(cells);
        }

        Ok(Self { headers, rows })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<Option<String>>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Non-missing cell values of one column, in row order.
    pub fn column_values(&self, column: usize) -> impl Iterator<Item = &str> {
        self.rows
            .iter()
            .filter_map(move |row| row.get(column).and_then(|cell| cell.as_deref()))
    }
}

/// Strict UTF-8 decode of the uploaded payload. Any invalid sequence
/// fails the whole request, mirroring a hard text-decode step before
/// CSV parsing.
pub fn decode_utf8(bytes: &[u8]) -> Result<String> {
    let (text, _, had_errors) = UTF_8.decode(bytes);
    if had_errors {
        Err(anyhow!("Failed to decode upload as {}", UTF_8.name()))
    } else {
        Ok(text.into_owned())
    }
}
