//! CSV upload intake
//!
//! Spools the multipart `file` field to a temporary file while enforcing the
//! size ceiling. The temporary file is deleted when the [`CsvUpload`] is
//! dropped, whichever way the request ends.

use std::io::Cursor;
use std::path::Path;

use axum::extract::Multipart;
use tempfile::NamedTempFile;
use tokio::io::AsyncWriteExt;

use tasks_core::import::CsvRows;

use crate::error::ApiError;

/// Multipart field carrying the upload
pub const UPLOAD_FIELD: &str = "file";

const ACCEPTED_CONTENT_TYPES: [&str; 2] = ["text/csv", "application/vnd.ms-excel"];

/// A received CSV upload backed by a temporary file
#[derive(Debug)]
pub struct CsvUpload {
    file: NamedTempFile,
    file_name: Option<String>,
    size: usize,
}

impl CsvUpload {
    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Lazily parsed rows of the upload. The spooled bytes are loaded
    /// without blocking the runtime.
    pub async fn rows(&self) -> std::io::Result<CsvRows<Cursor<Vec<u8>>>> {
        let bytes = tokio::fs::read(self.file.path()).await?;
        Ok(CsvRows::new(Cursor::new(bytes)))
    }
}

fn is_csv(content_type: Option<&str>, file_name: Option<&str>) -> bool {
    let type_ok = content_type
        .map(|ct| ct.split(';').next().unwrap_or_default().trim().to_ascii_lowercase())
        .is_some_and(|ct| ACCEPTED_CONTENT_TYPES.contains(&ct.as_str()));
    let name_ok = file_name.is_some_and(|name| name.to_ascii_lowercase().ends_with(".csv"));
    type_ok || name_ok
}

/// Receive the CSV upload from a multipart request into the system temp dir.
///
/// Other fields are skipped. Fails on a missing field, a non-CSV upload or
/// an upload larger than `max_bytes`.
pub async fn receive_csv(multipart: &mut Multipart, max_bytes: usize) -> Result<CsvUpload, ApiError> {
    receive_csv_in(multipart, max_bytes, &std::env::temp_dir()).await
}

/// Same as [`receive_csv`], spooling into `temp_dir`
pub async fn receive_csv_in(
    multipart: &mut Multipart,
    max_bytes: usize,
    temp_dir: &Path,
) -> Result<CsvUpload, ApiError> {
    while let Some(mut field) = multipart.next_field().await? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let file_name = field.file_name().map(|s| s.to_string());
        if !is_csv(field.content_type(), file_name.as_deref()) {
            return Err(ApiError::NotCsv);
        }

        let file = NamedTempFile::new_in(temp_dir).map_err(ApiError::internal)?;
        let handle = file.as_file().try_clone().map_err(ApiError::internal)?;
        let mut out = tokio::fs::File::from_std(handle);

        let mut size = 0usize;
        while let Some(chunk) = field.chunk().await? {
            size += chunk.len();
            if size > max_bytes {
                return Err(ApiError::TooLarge { limit: max_bytes });
            }
            out.write_all(&chunk).await.map_err(ApiError::internal)?;
        }
        out.flush().await.map_err(ApiError::internal)?;

        tracing::debug!(?file_name, size, "Received CSV upload");
        return Ok(CsvUpload {
            file,
            file_name,
            size,
        });
    }

    Err(ApiError::MissingFile)
}
