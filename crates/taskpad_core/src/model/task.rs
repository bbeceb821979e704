//! Task domain model.
//!
//! # Responsibility
//! - Define the single persisted record of the application.
//! - Validate user-supplied fields at creation time.
//!
//! # Invariants
//! - `id` is stable and never reused for another task.
//! - `text` is non-empty for every constructed task.
//! - `created_at` is fixed at creation and never mutated.

use chrono::Local;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a task, assigned once at creation.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type TaskId = Uuid;

/// Urgency level attached to a task at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    #[default]
    Low,
    Medium,
    High,
}

impl Priority {
    /// Returns the canonical lowercase name used in the persisted snapshot.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Parses the canonical lowercase name back into a priority.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Creation-time validation failures surfaced to the user as blocking input
/// errors. Nothing is persisted when validation fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskValidationError {
    EmptyText,
    EmptyDueDate,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyText => write!(f, "task description cannot be empty"),
            Self::EmptyDueDate => write!(f, "task due date cannot be empty"),
        }
    }
}

impl Error for TaskValidationError {}

/// One to-do record.
///
/// Serde renames keep the persisted field names stable (`date`, `dueDate`),
/// so snapshots written by earlier builds keep loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Stable id used for lookup, reordering and persistence.
    pub id: TaskId,
    /// User-supplied description. Never empty.
    pub text: String,
    /// Human-readable creation timestamp, fixed at creation.
    #[serde(rename = "date")]
    pub created_at: String,
    /// Calendar date string, set once at creation.
    #[serde(rename = "dueDate")]
    pub due_date: String,
    pub priority: Priority,
    pub completed: bool,
}

impl Task {
    /// Creates a task with a fresh stable id and the current timestamp.
    ///
    /// # Errors
    /// - `EmptyText` when `text` is blank after trimming.
    /// - `EmptyDueDate` when `due_date` is blank after trimming.
    pub fn new(
        text: impl Into<String>,
        due_date: impl Into<String>,
        priority: Priority,
    ) -> Result<Self, TaskValidationError> {
        Self::with_id(Uuid::new_v4(), text, due_date, priority)
    }

    /// Creates a task with a caller-provided stable id.
    ///
    /// Used by tests and import paths where identity already exists.
    pub fn with_id(
        id: TaskId,
        text: impl Into<String>,
        due_date: impl Into<String>,
        priority: Priority,
    ) -> Result<Self, TaskValidationError> {
        let text = text.into().trim().to_string();
        if text.is_empty() {
            return Err(TaskValidationError::EmptyText);
        }
        let due_date = due_date.into().trim().to_string();
        if due_date.is_empty() {
            return Err(TaskValidationError::EmptyDueDate);
        }

        Ok(Self {
            id,
            text,
            created_at: current_datetime_display(),
            due_date,
            priority,
            completed: false,
        })
    }
}

/// Formats the creation timestamp shown next to each task.
fn current_datetime_display() -> String {
    Local::now().format("%Y-%m-%d at %H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::{Priority, Task, TaskValidationError};

    #[test]
    fn new_task_starts_incomplete_with_trimmed_fields() {
        let task = Task::new("  buy milk  ", " 2025-01-01 ", Priority::High).unwrap();
        assert_eq!(task.text, "buy milk");
        assert_eq!(task.due_date, "2025-01-01");
        assert!(!task.completed);
        assert!(!task.created_at.is_empty());
    }

    #[test]
    fn blank_text_and_due_date_are_rejected() {
        assert_eq!(
            Task::new("   ", "2025-01-01", Priority::Low).unwrap_err(),
            TaskValidationError::EmptyText
        );
        assert_eq!(
            Task::new("walk dog", "", Priority::Low).unwrap_err(),
            TaskValidationError::EmptyDueDate
        );
    }

    #[test]
    fn priority_names_roundtrip() {
        for priority in [Priority::Low, Priority::Medium, Priority::High] {
            assert_eq!(Priority::parse(priority.as_str()), Some(priority));
        }
        assert_eq!(Priority::parse("urgent"), None);
    }
}
