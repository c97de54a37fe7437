//! Task API endpoints
//!
//! Task listing plus CSV export and import.

use axum::{
    extract::{Multipart, State},
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use uuid::Uuid;

use tasks_core::export::export_tasks;
use tasks_core::task::{Task, TaskPriority, TaskStatus};

use crate::error::ApiError;
use crate::state::AppState;
use crate::upload::receive_csv;

/// Header carrying the inserted count next to an error report
pub const IMPORTED_COUNT_HEADER: &str = "x-imported-count";

// ============================================================================
// Request/Response types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub due_date: String,
    pub priority: TaskPriority,
    pub status: TaskStatus,
    pub assigned_users: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Task> for TaskResponse {
    fn from(task: Task) -> Self {
        Self {
            id: task.id,
            title: task.title,
            description: task.description,
            due_date: task.due_date.format("%Y-%m-%d").to_string(),
            priority: task.priority,
            status: task.status,
            assigned_users: task.assigned_users,
            created_at: task.created_at.to_rfc3339(),
            updated_at: task.updated_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ImportSummary {
    pub message: String,
    pub inserted: usize,
}

fn csv_attachment(file_name: &str, body: Vec<u8>) -> Response {
    let disposition = format!("attachment; filename=\"{}\"", file_name);
    (
        [
            (
                header::CONTENT_TYPE,
                HeaderValue::from_static("text/csv; charset=utf-8"),
            ),
            (
                header::CONTENT_DISPOSITION,
                HeaderValue::from_str(&disposition)
                    .unwrap_or_else(|_| HeaderValue::from_static("attachment")),
            ),
        ],
        body,
    )
        .into_response()
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/tasks - List all tasks
async fn list_tasks(State(state): State<AppState>) -> Result<Json<Vec<TaskResponse>>, ApiError> {
    let tasks = state.task_store().list().await?;
    Ok(Json(tasks.into_iter().map(TaskResponse::from).collect()))
}

/// GET /api/tasks/export - Download all tasks as CSV
async fn export(State(state): State<AppState>) -> Result<Response, ApiError> {
    let tasks = state.task_store().list().await?;
    let body = export_tasks(&tasks).map_err(ApiError::internal)?;

    tracing::info!(count = tasks.len(), "Exported tasks");
    Ok(csv_attachment("tasks.csv", body))
}

/// POST /api/tasks/import - Import tasks from an uploaded CSV
///
/// Answers with a JSON summary when every row was imported, otherwise with
/// a CSV error report as an attachment. Accepted rows are inserted either way.
async fn import(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response, ApiError> {
    let upload = receive_csv(&mut multipart, state.max_csv_size()).await?;
    tracing::info!(
        file = upload.file_name().unwrap_or("<unnamed>"),
        size = upload.size(),
        "Importing CSV upload"
    );
    let rows = upload.rows().await.map_err(ApiError::internal)?;

    let report = state.importer().import(rows).await?;
    drop(upload);

    match report.error_report().map_err(ApiError::internal)? {
        None => Ok(Json(ImportSummary {
            message: "All tasks imported successfully.".to_string(),
            inserted: report.inserted,
        })
        .into_response()),
        Some(csv) => {
            let mut response = csv_attachment("error_report.csv", csv);
            response
                .headers_mut()
                .insert(IMPORTED_COUNT_HEADER, HeaderValue::from(report.inserted));
            Ok(response)
        }
    }
}

// ============================================================================
// Router
// ============================================================================

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/tasks", get(list_tasks))
        .route("/api/tasks/export", get(export))
        .route("/api/tasks/import", post(import))
}
