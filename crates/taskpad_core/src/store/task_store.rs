//! Ordered task collection with write-through persistence.
//!
//! # Responsibility
//! - Hold the in-memory ordered collection as the single source of truth.
//! - Apply create/update/delete/reorder mutations and persist each one.
//!
//! # Invariants
//! - Collection order is significant: newest task first, then user-chosen
//!   manual order.
//! - No mutation leaves the collection with duplicate or missing ids
//!   relative to its pre-call contents.
//! - Every successful mutation is persisted before it returns.

use crate::model::task::{Priority, Task, TaskId, TaskValidationError};
use crate::repo::snapshot_repo::{RepoError, SnapshotRepository};
use log::info;
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Error for task store mutations: input validation or persistence.
#[derive(Debug)]
pub enum StoreError {
    Validation(TaskValidationError),
    Repo(RepoError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<TaskValidationError> for StoreError {
    fn from(value: TaskValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for StoreError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Ordered in-memory task collection backed by a snapshot repository.
pub struct TaskStore<R: SnapshotRepository> {
    repo: R,
    tasks: Vec<Task>,
}

impl<R: SnapshotRepository> TaskStore<R> {
    /// Loads the persisted collection into memory.
    ///
    /// Missing or malformed snapshots start the store empty.
    pub fn load(repo: R) -> StoreResult<Self> {
        let tasks = repo.load()?;
        info!(
            "event=store_load module=store status=ok count={}",
            tasks.len()
        );
        Ok(Self { repo, tasks })
    }

    /// Returns the full collection in its current order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Looks up a task by id.
    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Creates a task and inserts it at the front of the order (most
    /// recent first).
    pub fn add(
        &mut self,
        text: impl Into<String>,
        due_date: impl Into<String>,
        priority: Priority,
    ) -> StoreResult<TaskId> {
        let task = Task::new(text, due_date, priority)?;
        let id = task.id;
        self.tasks.insert(0, task);
        self.persist()?;
        info!("event=task_add module=store status=ok id={id}");
        Ok(id)
    }

    /// Sets the completion flag of the matching task.
    ///
    /// Returns `false` without touching storage when the id is unknown.
    pub fn set_completed(&mut self, id: TaskId, completed: bool) -> StoreResult<bool> {
        let Some(task) = self.tasks.iter_mut().find(|task| task.id == id) else {
            return Ok(false);
        };
        task.completed = completed;
        self.persist()?;
        info!("event=task_set_completed module=store status=ok id={id} completed={completed}");
        Ok(true)
    }

    /// Replaces the task text when the new value is non-empty and differs
    /// from the current one; otherwise the edit is discarded silently.
    ///
    /// Returns whether the text actually changed.
    pub fn edit_text(&mut self, id: TaskId, new_text: &str) -> StoreResult<bool> {
        let new_text = new_text.trim();
        let Some(task) = self.tasks.iter_mut().find(|task| task.id == id) else {
            return Ok(false);
        };
        if new_text.is_empty() || new_text == task.text {
            return Ok(false);
        }
        task.text = new_text.to_string();
        self.persist()?;
        info!("event=task_edit module=store status=ok id={id}");
        Ok(true)
    }

    /// Deletes the matching task. Unknown ids are a no-op.
    pub fn remove(&mut self, id: TaskId) -> StoreResult<bool> {
        let Some(index) = self.tasks.iter().position(|task| task.id == id) else {
            return Ok(false);
        };
        self.tasks.remove(index);
        self.persist()?;
        info!("event=task_remove module=store status=ok id={id}");
        Ok(true)
    }

    /// Bulk delete of every task matching the predicate. Survivors keep
    /// their relative order.
    ///
    /// Returns the number of removed tasks; zero matches skip persistence.
    pub fn remove_where(&mut self, predicate: impl Fn(&Task) -> bool) -> StoreResult<usize> {
        let before = self.tasks.len();
        self.tasks.retain(|task| !predicate(task));
        let removed = before - self.tasks.len();
        if removed == 0 {
            return Ok(0);
        }
        self.persist()?;
        info!("event=task_remove_bulk module=store status=ok removed={removed}");
        Ok(removed)
    }

    /// Rewrites the collection order to match `new_order`.
    ///
    /// Ids absent from the collection are ignored, duplicates collapse to
    /// their first occurrence, and tasks not listed in `new_order` are
    /// retained after the listed ones in their original relative order, so
    /// no task is ever lost by a reorder.
    pub fn reorder(&mut self, new_order: &[TaskId]) -> StoreResult<()> {
        let mut taken: HashSet<TaskId> = HashSet::with_capacity(new_order.len());
        let mut reordered: Vec<Task> = Vec::with_capacity(self.tasks.len());

        for id in new_order {
            if !taken.insert(*id) {
                continue;
            }
            if let Some(index) = self.tasks.iter().position(|task| task.id == *id) {
                reordered.push(self.tasks.remove(index));
            }
        }
        reordered.append(&mut self.tasks);

        self.tasks = reordered;
        self.persist()?;
        info!(
            "event=task_reorder module=store status=ok count={}",
            self.tasks.len()
        );
        Ok(())
    }

    fn persist(&self) -> StoreResult<()> {
        self.repo.save(&self.tasks)?;
        Ok(())
    }
}
