//! Import results and the downloadable error report

use serde::Serialize;

use crate::{Error, Result};

/// Header of the error report artifact
pub const ERROR_REPORT_HEADER: [&str; 2] = ["Row", "Error Message"];

/// A rejected input row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowError {
    /// 1-based position in the upload, header excluded
    pub row: usize,
    pub message: String,
}

impl RowError {
    pub fn new(row: usize, message: impl Into<String>) -> Self {
        Self {
            row,
            message: message.into(),
        }
    }
}

/// Outcome of one import call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    pub inserted: usize,
    pub errors: Vec<RowError>,
}

impl ImportReport {
    /// True when every row was imported
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /// CSV error report, or `None` when nothing was rejected
    pub fn error_report(&self) -> Result<Option<Vec<u8>>> {
        if self.is_clean() {
            return Ok(None);
        }
        build_error_report(&self.errors).map(Some)
    }
}

/// Serialize row errors as CSV with a `Row,Error Message` header, in order.
pub fn build_error_report(errors: &[RowError]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(ERROR_REPORT_HEADER)?;
    for error in errors {
        writer.write_record([error.row.to_string().as_str(), error.message.as_str()])?;
    }
    writer.into_inner().map_err(|e| Error::Io(e.into_error()))
}
