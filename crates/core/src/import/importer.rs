//! Batch importer
//!
//! Streams rows through validation and the store checks, collects row
//! errors, and writes every accepted row with a single bulk insert once the
//! input is exhausted.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use thiserror::Error;

use super::check::RowChecker;
use super::report::{ImportReport, RowError};
use super::row::RawRow;
use super::validate::validate_row;
use crate::task::{Task, TaskRepository};

/// Failures that abort a whole import. Row problems never end up here.
#[derive(Error, Debug)]
pub enum ImportError {
    /// The input stream could not be read as CSV
    #[error("Error parsing CSV file at row {row}: {source}")]
    Parse {
        row: usize,
        #[source]
        source: crate::Error,
    },

    /// A store lookup or the bulk insert failed
    #[error("Error importing tasks: {0}")]
    Store(#[source] crate::Error),
}

/// Imports CSV rows into a task store
#[derive(Clone)]
pub struct TaskImporter {
    store: Arc<dyn TaskRepository>,
    today: Option<NaiveDate>,
}

impl TaskImporter {
    pub fn new(store: Arc<dyn TaskRepository>) -> Self {
        Self { store, today: None }
    }

    /// Pin the date used for past-due checks instead of the current UTC date
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// Import rows in order. Rows are numbered from 1, header excluded.
    ///
    /// Rejected rows are reported in the returned [`ImportReport`] and never
    /// stop the import. Nothing is written until the input ends; a read
    /// error or store failure aborts the call without writing.
    pub async fn import<I>(&self, rows: I) -> Result<ImportReport, ImportError>
    where
        I: IntoIterator<Item = crate::Result<RawRow>>,
        I::IntoIter: Send,
    {
        let today = self.today.unwrap_or_else(|| Utc::now().date_naive());
        let mut checker = RowChecker::new(self.store.as_ref(), today);
        let mut pending: Vec<Task> = Vec::new();
        let mut errors: Vec<RowError> = Vec::new();
        let mut total = 0;

        for (index, row) in rows.into_iter().enumerate() {
            let row_number = index + 1;
            let row = row.map_err(|source| ImportError::Parse {
                row: row_number,
                source,
            })?;
            total = row_number;

            let draft = match validate_row(&row) {
                Ok(draft) => draft,
                Err(e) => {
                    tracing::debug!(row = row_number, field = e.field, "Row failed validation");
                    errors.push(RowError::new(row_number, e.to_string()));
                    continue;
                }
            };

            let rejection = checker
                .check(row_number, &draft)
                .await
                .map_err(ImportError::Store)?;
            if let Some(rejection) = rejection {
                tracing::debug!(row = row_number, reason = %rejection, "Row rejected");
                errors.push(RowError::new(row_number, rejection.to_string()));
                continue;
            }

            pending.push(draft.into_task());
        }

        let inserted = if pending.is_empty() {
            0
        } else {
            self.store.bulk_insert(pending).await.map_err(|e| {
                tracing::error!("Bulk insert failed: {}", e);
                ImportError::Store(e)
            })?
        };

        tracing::info!(
            rows = total,
            inserted,
            rejected = errors.len(),
            "CSV import finished"
        );

        Ok(ImportReport { inserted, errors })
    }
}
