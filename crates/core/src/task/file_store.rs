//! File-based task storage implementation
//!
//! Stores tasks as JSON in a file on disk.

use async_trait::async_trait;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

use super::model::Task;
use super::repository::TaskRepository;
use crate::{Error, Result};

/// File-based task store using JSON
pub struct FileTaskStore {
    /// Path to the JSON file
    path: PathBuf,
    /// In-memory cache of tasks, in insertion order
    cache: RwLock<Vec<Task>>,
}

impl FileTaskStore {
    /// Create a new FileTaskStore
    ///
    /// If the file doesn't exist, it will be created on first write.
    pub async fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let cache = if path.exists() {
            let content = tokio::fs::read_to_string(&path).await?;
            serde_json::from_str(&content)?
        } else {
            Vec::new()
        };

        Ok(Self {
            path,
            cache: RwLock::new(cache),
        })
    }

    /// Path of the backing JSON file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persist the given tasks to disk
    async fn persist(&self, tasks: &[Task]) -> Result<()> {
        let content = serde_json::to_string_pretty(tasks)?;

        // Ensure parent directory exists
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(&self.path, content).await?;
        Ok(())
    }
}

#[async_trait]
impl TaskRepository for FileTaskStore {
    async fn find_by_title(&self, title: &str) -> Result<Option<Task>> {
        let cache = self.cache.read().await;
        Ok(cache.iter().find(|t| t.title == title).cloned())
    }

    async fn list(&self) -> Result<Vec<Task>> {
        let cache = self.cache.read().await;
        Ok(cache.clone())
    }

    async fn bulk_insert(&self, tasks: Vec<Task>) -> Result<usize> {
        if tasks.is_empty() {
            return Ok(0);
        }

        let mut cache = self.cache.write().await;

        let mut titles: HashSet<&str> = cache.iter().map(|t| t.title.as_str()).collect();
        for task in &tasks {
            if !titles.insert(task.title.as_str()) {
                return Err(Error::DuplicateTitle(task.title.clone()));
            }
        }

        let previous_len = cache.len();
        let inserted = tasks.len();
        cache.extend(tasks);

        // Roll back so memory never diverges from disk
        if let Err(e) = self.persist(&cache).await {
            cache.truncate(previous_len);
            return Err(e);
        }

        tracing::debug!(inserted, total = cache.len(), "Bulk inserted tasks");
        Ok(inserted)
    }
}
