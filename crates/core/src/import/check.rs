//! Duplicate and due-date checks for validated rows

use std::collections::HashMap;
use std::fmt;

use chrono::NaiveDate;

use super::validate::TaskDraft;
use crate::task::TaskRepository;
use crate::Result;

/// Why a valid row was still refused
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// The title already exists in the store
    DuplicateTitle,
    /// The title was already accepted from an earlier row of the same file
    DuplicateInBatch { first_row: usize },
    /// The due date lies before today
    PastDueDate,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateTitle => f.write_str("Duplicate task title."),
            Self::DuplicateInBatch { first_row } => {
                write!(f, "Duplicate task title. First seen in row {}.", first_row)
            }
            Self::PastDueDate => f.write_str("Due date cannot be in the past."),
        }
    }
}

/// Checks drafts against the store state before the import's bulk insert.
///
/// "Today" is a UTC calendar date. Titles of accepted drafts are remembered
/// so a later row with the same title is refused.
pub struct RowChecker<'a> {
    store: &'a dyn TaskRepository,
    today: NaiveDate,
    accepted: HashMap<String, usize>,
}

impl<'a> RowChecker<'a> {
    pub fn new(store: &'a dyn TaskRepository, today: NaiveDate) -> Self {
        Self {
            store,
            today,
            accepted: HashMap::new(),
        }
    }

    /// Check one draft. Duplicates are reported before past due dates.
    ///
    /// Returns `Ok(None)` when the draft is accepted; store failures are
    /// returned as errors.
    pub async fn check(&mut self, row: usize, draft: &TaskDraft) -> Result<Option<Rejection>> {
        if self.store.find_by_title(&draft.title).await?.is_some() {
            return Ok(Some(Rejection::DuplicateTitle));
        }

        if let Some(&first_row) = self.accepted.get(&draft.title) {
            return Ok(Some(Rejection::DuplicateInBatch { first_row }));
        }

        if draft.due_date < self.today {
            return Ok(Some(Rejection::PastDueDate));
        }

        self.accepted.insert(draft.title.clone(), row);
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{FileTaskStore, Task, TaskPriority, TaskStatus};
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn draft(title: &str, due_date: NaiveDate) -> TaskDraft {
        TaskDraft {
            title: title.to_string(),
            description: String::new(),
            due_date,
            priority: TaskPriority::Low,
            status: TaskStatus::Todo,
            assigned_users: Vec::new(),
        }
    }

    async fn store_with(titles: &[&str]) -> (FileTaskStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = FileTaskStore::new(temp_dir.path().join("tasks.json"))
            .await
            .unwrap();
        let tasks = titles
            .iter()
            .map(|t| Task::new(*t, date(2030, 1, 1)))
            .collect();
        store.bulk_insert(tasks).await.unwrap();
        (store, temp_dir)
    }

    #[tokio::test]
    async fn test_accepts_new_title_due_today() {
        let (store, _temp) = store_with(&[]).await;
        let today = date(2026, 10, 17);
        let mut checker = RowChecker::new(&store, today);

        assert_eq!(checker.check(1, &draft("New", today)).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_rejects_existing_title() {
        let (store, _temp) = store_with(&["Existing"]).await;
        let mut checker = RowChecker::new(&store, date(2026, 10, 17));

        let rejection = checker
            .check(1, &draft("Existing", date(2030, 1, 1)))
            .await
            .unwrap();
        assert_eq!(rejection, Some(Rejection::DuplicateTitle));
    }

    #[tokio::test]
    async fn test_duplicate_takes_precedence_over_past_date() {
        let (store, _temp) = store_with(&["Existing"]).await;
        let mut checker = RowChecker::new(&store, date(2026, 10, 17));

        let rejection = checker
            .check(1, &draft("Existing", date(2001, 1, 1)))
            .await
            .unwrap();
        assert_eq!(rejection, Some(Rejection::DuplicateTitle));
    }

    #[tokio::test]
    async fn test_rejects_past_due_date() {
        let (store, _temp) = store_with(&[]).await;
        let mut checker = RowChecker::new(&store, date(2026, 10, 17));

        let rejection = checker
            .check(1, &draft("Late", date(2026, 10, 16)))
            .await
            .unwrap();
        assert_eq!(rejection, Some(Rejection::PastDueDate));
        assert_eq!(rejection.unwrap().to_string(), "Due date cannot be in the past.");
    }

    #[tokio::test]
    async fn test_rejects_repeat_within_batch() {
        let (store, _temp) = store_with(&[]).await;
        let mut checker = RowChecker::new(&store, date(2026, 10, 17));

        assert_eq!(checker.check(2, &draft("Twin", date(2030, 1, 1))).await.unwrap(), None);
        let rejection = checker
            .check(5, &draft("Twin", date(2030, 1, 1)))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(rejection, Rejection::DuplicateInBatch { first_row: 2 });
        assert_eq!(
            rejection.to_string(),
            "Duplicate task title. First seen in row 2."
        );
    }

    #[tokio::test]
    async fn test_rejected_rows_do_not_claim_title() {
        let (store, _temp) = store_with(&[]).await;
        let mut checker = RowChecker::new(&store, date(2026, 10, 17));

        let late = checker.check(1, &draft("Retry", date(2020, 1, 1))).await.unwrap();
        assert_eq!(late, Some(Rejection::PastDueDate));
        assert_eq!(checker.check(2, &draft("Retry", date(2030, 1, 1))).await.unwrap(), None);
    }
}
