//! Raw CSV rows and the lazy row reader

use std::collections::HashMap;
use std::io::Read;

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::Result;

/// Normalize a column name so `Due Date`, `due_date` and `dueDate` match.
pub fn normalize_column(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

/// One uploaded row: column name to cell value, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    fields: HashMap<String, String>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a cell; the column name is normalized.
    pub fn with(mut self, column: &str, value: impl Into<String>) -> Self {
        self.insert(column, value);
        self
    }

    pub fn insert(&mut self, column: &str, value: impl Into<String>) {
        self.fields.insert(normalize_column(column), value.into());
    }

    /// Trimmed, non-empty value of a column
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .get(&normalize_column(column))
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for RawRow {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut row = RawRow::new();
        for (column, value) in iter {
            row.insert(column.as_ref(), value);
        }
        row
    }
}

/// Lazily reads [`RawRow`]s from CSV with a header line.
///
/// Finite and not restartable. A malformed record yields one `Err` and ends
/// the sequence.
pub struct CsvRows<R: Read> {
    reader: csv::Reader<R>,
    headers: Option<Vec<String>>,
    record: StringRecord,
    finished: bool,
}

impl<R: Read> CsvRows<R> {
    pub fn new(input: R) -> Self {
        let reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(input);

        Self {
            reader,
            headers: None,
            record: StringRecord::new(),
            finished: false,
        }
    }

    fn headers(&mut self) -> Result<&[String]> {
        if self.headers.is_none() {
            let headers = self
                .reader
                .headers()?
                .iter()
                .map(normalize_column)
                .collect();
            self.headers = Some(headers);
        }
        Ok(self.headers.as_deref().unwrap_or_default())
    }

    fn read_row(&mut self) -> Result<Option<RawRow>> {
        self.headers()?;
        if !self.reader.read_record(&mut self.record)? {
            return Ok(None);
        }

        let headers = self.headers.as_deref().unwrap_or_default();
        let row = headers
            .iter()
            .zip(self.record.iter())
            .map(|(column, value)| (column.as_str(), value))
            .collect();
        Ok(Some(row))
    }
}

impl<R: Read> Iterator for CsvRows<R> {
    type Item = Result<RawRow>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        match self.read_row() {
            Ok(Some(row)) => Some(Ok(row)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}
