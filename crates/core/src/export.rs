//! CSV export of the task store

use crate::task::Task;
use crate::{Error, Result};

/// Header of the export artifact
pub const EXPORT_HEADER: [&str; 6] = [
    "Title",
    "Description",
    "Due Date",
    "Priority",
    "Status",
    "Assigned Users",
];

/// Join used for multi-value cells; the importer splits on `;` and trims.
const USERS_SEPARATOR: &str = "; ";

/// Render tasks as CSV, one line per task in the given order.
pub fn export_tasks(tasks: &[Task]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(EXPORT_HEADER)?;

    for task in tasks {
        let due_date = task.due_date.format("%Y-%m-%d").to_string();
        let assigned_users = task.assigned_users.join(USERS_SEPARATOR);
        writer.write_record([
            task.title.as_str(),
            task.description.as_str(),
            due_date.as_str(),
            task.priority.as_str(),
            task.status.as_str(),
            assigned_users.as_str(),
        ])?;
    }

    writer.into_inner().map_err(|e| Error::Io(e.into_error()))
}
