//! Application state

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tasks_core::import::TaskImporter;
use tasks_core::task::{FileTaskStore, TaskRepository};

use crate::config::ServerConfig;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    task_store: Arc<dyn TaskRepository>,
    data_dir: PathBuf,
    max_csv_size: usize,
}

impl AppState {
    /// Open the file-backed task store under the configured data directory
    pub async fn new(config: &ServerConfig) -> tasks_core::Result<Self> {
        let tasks_path = config.data_dir.join("tasks.json");
        let task_store = FileTaskStore::new(tasks_path).await?;

        Ok(Self::with_store(Arc::new(task_store), config))
    }

    /// Build state around an existing store
    pub fn with_store(task_store: Arc<dyn TaskRepository>, config: &ServerConfig) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                task_store,
                data_dir: config.data_dir.clone(),
                max_csv_size: config.max_csv_size,
            }),
        }
    }

    /// Get reference to the task store
    pub fn task_store(&self) -> &dyn TaskRepository {
        self.inner.task_store.as_ref()
    }

    /// Importer bound to this state's store
    pub fn importer(&self) -> TaskImporter {
        TaskImporter::new(Arc::clone(&self.inner.task_store))
    }

    /// Directory holding the task store
    pub fn data_dir(&self) -> &Path {
        &self.inner.data_dir
    }

    /// Upload ceiling in bytes
    pub fn max_csv_size(&self) -> usize {
        self.inner.max_csv_size
    }
}
