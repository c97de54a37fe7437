//! CSV import pipeline
//!
//! Rows flow through [`validate_row`], then [`RowChecker`], and accepted
//! rows are written by [`TaskImporter`] in one bulk insert. Rejected rows are
//! collected as [`RowError`]s and can be rendered with [`build_error_report`].

mod check;
mod importer;
mod report;
mod row;
mod validate;

pub use check::{Rejection, RowChecker};
pub use importer::{ImportError, TaskImporter};
pub use report::{build_error_report, ImportReport, RowError, ERROR_REPORT_HEADER};
pub use row::{normalize_column, CsvRows, RawRow};
pub use validate::{split_list, validate_row, TaskDraft, ValidationError, LIST_DELIMITER};
