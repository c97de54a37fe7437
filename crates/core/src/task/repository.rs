//! Task repository trait
//!
//! Defines the interface for task storage operations.

use async_trait::async_trait;

use super::model::Task;
use crate::Result;

/// Repository interface for the task document store
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Find a task by its exact (case-sensitive) title
    async fn find_by_title(&self, title: &str) -> Result<Option<Task>>;

    /// Get all tasks in insertion order
    async fn list(&self) -> Result<Vec<Task>>;

    /// Insert many tasks in one operation, returning how many were written.
    ///
    /// Fails with [`crate::Error::DuplicateTitle`] if any title is already
    /// taken; in that case nothing is written.
    async fn bulk_insert(&self, tasks: Vec<Task>) -> Result<usize>;
}
