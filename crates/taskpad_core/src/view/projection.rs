//! Pure projection of the task collection onto the visible list.
//!
//! # Responsibility
//! - Apply the completion filter and the search query to the collection.
//!
//! # Invariants
//! - Output order is a subsequence of input order.
//! - No side effects; safe to call on every keystroke.

use crate::model::task::Task;

/// Completion filter restricting which tasks are displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Filter {
    #[default]
    All,
    Active,
    Completed,
}

impl Filter {
    /// Returns whether a task passes this filter.
    pub fn matches(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Active => !task.completed,
            Self::Completed => task.completed,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "all" => Some(Self::All),
            "active" => Some(Self::Active),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }
}

/// Derives the visible task list from filter and search state.
///
/// The search is a case-insensitive substring match against the task text;
/// an empty query matches everything. Both predicates are ANDed. Surviving
/// tasks keep their relative order from `tasks`.
pub fn project<'a>(tasks: &'a [Task], filter: Filter, search_query: &str) -> Vec<&'a Task> {
    let needle = search_query.to_lowercase();
    tasks
        .iter()
        .filter(|task| filter.matches(task) && task.text.to_lowercase().contains(&needle))
        .collect()
}
