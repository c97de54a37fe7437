//! Row validation
//!
//! Turns a [`RawRow`] into a fixed-shape [`TaskDraft`] before any business
//! rule looks at it.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};

use super::row::RawRow;
use crate::task::{Task, TaskPriority, TaskStatus};

/// Separator for multi-value cells such as assigned users
pub const LIST_DELIMITER: char = ';';

/// A validated row, not yet checked against the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub due_date: NaiveDate,
    pub priority: TaskPriority,
    pub status: TaskStatus,
    pub assigned_users: Vec<String>,
}

impl TaskDraft {
    pub fn into_task(self) -> Task {
        Task::new(self.title, self.due_date)
            .with_description(self.description)
            .with_priority(self.priority)
            .with_status(self.status)
            .with_assigned_users(self.assigned_users)
    }
}

/// The first field of a row that failed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn required(field: &'static str) -> Self {
        Self {
            field,
            message: format!("\"{}\" is required", field),
        }
    }

    fn one_of(field: &'static str, allowed: &[&str]) -> Self {
        Self {
            field,
            message: format!("\"{}\" must be one of [{}]", field, allowed.join(", ")),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ValidationError {}

fn required<'a>(row: &'a RawRow, field: &'static str) -> Result<&'a str, ValidationError> {
    row.get(field).ok_or_else(|| ValidationError::required(field))
}

fn parse_due_date(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(value).map(|dt| dt.with_timezone(&Utc).date_naive()))
        .map_err(|_| ValidationError {
            field: "dueDate",
            message: "\"dueDate\" must be a valid date (YYYY-MM-DD)".to_string(),
        })
}

/// Split a delimiter-joined list, dropping blank entries
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(LIST_DELIMITER)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
        .collect()
}

/// Validate one row. Fields are checked in column order and the first
/// failure is returned.
pub fn validate_row(row: &RawRow) -> Result<TaskDraft, ValidationError> {
    let title = required(row, "title")?.to_string();
    let description = row.get("description").unwrap_or_default().to_string();
    let due_date = parse_due_date(required(row, "dueDate")?)?;

    let priority = required(row, "priority")?
        .parse::<TaskPriority>()
        .map_err(|_| {
            let allowed = TaskPriority::ALL.map(|p| p.as_str());
            ValidationError::one_of("priority", &allowed)
        })?;

    let status = required(row, "status")?
        .parse::<TaskStatus>()
        .map_err(|_| {
            let allowed = TaskStatus::ALL.map(|s| s.as_str());
            ValidationError::one_of("status", &allowed)
        })?;

    let assigned_users = row.get("assignedUsers").map(split_list).unwrap_or_default();

    Ok(TaskDraft {
        title,
        description,
        due_date,
        priority,
        status,
        assigned_users,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_row() -> RawRow {
        RawRow::new()
            .with("Title", "Plan sprint")
            .with("Description", "Two week cadence")
            .with("Due Date", "2030-05-01")
            .with("Priority", "High")
            .with("Status", "In Progress")
            .with("Assigned Users", "alice; bob;carol")
    }

    #[test]
    fn test_valid_row() {
        let draft = validate_row(&valid_row()).unwrap();

        assert_eq!(draft.title, "Plan sprint");
        assert_eq!(draft.description, "Two week cadence");
        assert_eq!(draft.due_date, NaiveDate::from_ymd_opt(2030, 5, 1).unwrap());
        assert_eq!(draft.priority, TaskPriority::High);
        assert_eq!(draft.status, TaskStatus::InProgress);
        assert_eq!(draft.assigned_users, vec!["alice", "bob", "carol"]);
    }

    #[test]
    fn test_optional_fields_default() {
        let row = RawRow::new()
            .with("title", "Minimal")
            .with("dueDate", "2030-05-01")
            .with("priority", "Low")
            .with("status", "To Do");

        let draft = validate_row(&row).unwrap();
        assert_eq!(draft.description, "");
        assert!(draft.assigned_users.is_empty());
    }

    #[test]
    fn test_missing_required_fields_are_named() {
        for (column, field) in [
            ("Title", "title"),
            ("Due Date", "dueDate"),
            ("Priority", "priority"),
            ("Status", "status"),
        ] {
            let row = valid_row().with(column, "");
            let err = validate_row(&row).unwrap_err();
            assert_eq!(err.field, field);
            assert!(err.message.contains(field), "{}", err.message);
            assert!(err.message.contains("required"));
        }
    }

    #[test]
    fn test_first_failing_field_wins() {
        let row = RawRow::new().with("priority", "Urgent");
        let err = validate_row(&row).unwrap_err();
        assert_eq!(err.field, "title");
    }

    #[test]
    fn test_enum_values_are_case_sensitive() {
        let err = validate_row(&valid_row().with("Priority", "Urgent")).unwrap_err();
        assert_eq!(err.field, "priority");
        assert_eq!(err.message, "\"priority\" must be one of [Low, Medium, High]");

        let err = validate_row(&valid_row().with("Priority", "high")).unwrap_err();
        assert_eq!(err.field, "priority");

        let err = validate_row(&valid_row().with("Status", "done")).unwrap_err();
        assert_eq!(err.field, "status");
        assert_eq!(
            err.message,
            "\"status\" must be one of [To Do, In Progress, Done]"
        );
    }

    #[test]
    fn test_due_date_formats() {
        let err = validate_row(&valid_row().with("Due Date", "next tuesday")).unwrap_err();
        assert_eq!(err.field, "dueDate");

        let err = validate_row(&valid_row().with("Due Date", "2030-02-30")).unwrap_err();
        assert_eq!(err.field, "dueDate");

        let draft = validate_row(&valid_row().with("Due Date", "2030-05-01T23:30:00Z")).unwrap();
        assert_eq!(draft.due_date, NaiveDate::from_ymd_opt(2030, 5, 1).unwrap());
    }

    #[test]
    fn test_split_list() {
        assert_eq!(split_list("a; b ;;c"), vec!["a", "b", "c"]);
        assert!(split_list(" ; ").is_empty());
    }

    #[test]
    fn test_into_task() {
        let task = validate_row(&valid_row()).unwrap().into_task();
        assert_eq!(task.title, "Plan sprint");
        assert_eq!(task.assigned_users.len(), 3);
    }
}
