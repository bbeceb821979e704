//! Interaction controller wiring user affordances to store mutations.
//!
//! # Responsibility
//! - Validate and apply add/edit actions directly.
//! - Route destructive actions through the confirmation gate and defer
//!   removals until exit animations complete.
//! - Derive the visible list from filter, search and drag state.
//!
//! # Invariants
//! - Declined confirmations leave the stored truth untouched; a re-render
//!   from the store reverts any optimistic visual state.
//! - Zero-participant bulk actions never invoke the gate.
//! - A drag overlay only reaches the store when the gesture ends.

use crate::controller::exit::ExitAnimator;
use crate::gate::{ConfirmationGate, GateError};
use crate::model::task::{Priority, Task, TaskId};
use crate::repo::snapshot_repo::SnapshotRepository;
use crate::store::task_store::{StoreError, TaskStore};
use crate::view::drag::{DragPlacement, DragSession};
use crate::view::projection::{project, Filter};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ControllerResult<T> = Result<T, ControllerError>;

/// Error surfaced by controller operations.
///
/// Validation errors arrive wrapped in `Store` and are shown to the user
/// as blocking input errors; gate errors mean the prompt infrastructure
/// itself failed, not that the user declined.
#[derive(Debug)]
pub enum ControllerError {
    Store(StoreError),
    Gate(GateError),
}

impl Display for ControllerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::Gate(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ControllerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Gate(err) => Some(err),
        }
    }
}

impl From<StoreError> for ControllerError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<GateError> for ControllerError {
    fn from(value: GateError) -> Self {
        Self::Gate(value)
    }
}

/// Owns the task store plus the view state the user manipulates.
pub struct InteractionController<R, G, A>
where
    R: SnapshotRepository,
    G: ConfirmationGate,
    A: ExitAnimator,
{
    store: TaskStore<R>,
    gate: G,
    animator: A,
    filter: Filter,
    search: String,
    drag: Option<DragSession>,
}

impl<R, G, A> InteractionController<R, G, A>
where
    R: SnapshotRepository,
    G: ConfirmationGate,
    A: ExitAnimator,
{
    pub fn new(store: TaskStore<R>, gate: G, animator: A) -> Self {
        Self {
            store,
            gate,
            animator,
            filter: Filter::All,
            search: String::new(),
            drag: None,
        }
    }

    /// Read access to the underlying collection.
    pub fn store(&self) -> &TaskStore<R> {
        &self.store
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// Tasks currently displayed, in display order.
    ///
    /// While a drag is in flight the session's visual overlay drives row
    /// order instead of the model.
    pub fn visible(&self) -> Vec<&Task> {
        let projected = project(self.store.tasks(), self.filter, &self.search);
        match &self.drag {
            None => projected,
            Some(session) => session
                .order()
                .iter()
                .filter_map(|id| projected.iter().find(|task| task.id == *id).copied())
                .collect(),
        }
    }

    /// Adds a task. Unconditional apart from input validation; validation
    /// failures surface as a blocking input error and mutate nothing.
    pub fn add_task(
        &mut self,
        text: impl Into<String>,
        due_date: impl Into<String>,
        priority: Priority,
    ) -> ControllerResult<TaskId> {
        Ok(self.store.add(text, due_date, priority)?)
    }

    /// Toggles completion of a task behind a confirmation prompt.
    ///
    /// Returns whether the flag was flipped. On decline the stored value
    /// is untouched, so re-rendering from the store reverts the checkbox.
    /// Unknown ids are a silent no-op.
    pub async fn toggle_completion(&mut self, id: TaskId) -> ControllerResult<bool> {
        let Some(currently_completed) = self.store.get(id).map(|task| task.completed) else {
            return Ok(false);
        };

        let action = if currently_completed {
            "uncomplete"
        } else {
            "complete"
        };
        let message = format!("Are you sure you want to {action} this task?");
        if !self.gate.confirm(&message).await? {
            info!("event=toggle_declined module=controller status=ok id={id}");
            return Ok(false);
        }

        Ok(self.store.set_completed(id, !currently_completed)?)
    }

    /// Commits an inline text edit. Empty or unchanged input discards the
    /// edit silently, with no confirmation and no error.
    pub fn edit_text(&mut self, id: TaskId, new_text: &str) -> ControllerResult<bool> {
        Ok(self.store.edit_text(id, new_text)?)
    }

    /// Deletes one task behind a confirmation prompt; the row's exit
    /// animation completes before the store mutates.
    pub async fn delete_task(&mut self, id: TaskId) -> ControllerResult<bool> {
        if self.store.get(id).is_none() {
            return Ok(false);
        }

        if !self
            .gate
            .confirm("Are you sure you want to delete this task?")
            .await?
        {
            return Ok(false);
        }

        self.animator.animate_exit(&[id]).await;
        Ok(self.store.remove(id)?)
    }

    /// Removes every completed task behind a count-bearing confirmation.
    ///
    /// With zero completed tasks the gate is not even invoked. Exit
    /// animations for the visible completed rows all finish before the
    /// batched removal executes. Returns the number of removed tasks.
    pub async fn clear_completed(&mut self) -> ControllerResult<usize> {
        let completed_count = self
            .store
            .tasks()
            .iter()
            .filter(|task| task.completed)
            .count();
        if completed_count == 0 {
            return Ok(0);
        }

        let message =
            format!("Are you sure you want to clear all {completed_count} completed tasks?");
        if !self.gate.confirm(&message).await? {
            return Ok(0);
        }

        let exiting: Vec<TaskId> = self
            .visible()
            .iter()
            .filter(|task| task.completed)
            .map(|task| task.id)
            .collect();
        self.animator.animate_exit(&exiting).await;

        Ok(self.store.remove_where(|task| task.completed)?)
    }

    /// Removes every task behind a stronger count-bearing confirmation.
    ///
    /// Same gate-then-animations-then-mutate sequencing as
    /// `clear_completed`; an empty collection is a no-op before the gate.
    pub async fn delete_all(&mut self) -> ControllerResult<usize> {
        let total = self.store.len();
        if total == 0 {
            return Ok(0);
        }

        let message = format!(
            "Are you sure you want to delete all {total} tasks? This action cannot be undone."
        );
        if !self.gate.confirm(&message).await? {
            return Ok(0);
        }

        let exiting: Vec<TaskId> = self.visible().iter().map(|task| task.id).collect();
        self.animator.animate_exit(&exiting).await;

        Ok(self.store.remove_where(|_| true)?)
    }

    /// Switches the active completion filter. Immediate and unconfirmed.
    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    /// Updates the search query. Re-derive the view after every call; no
    /// debounce.
    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search = query.into();
    }

    /// Starts a drag gesture over the currently visible rows.
    ///
    /// Returns `false` when the id is not visible right now.
    pub fn begin_drag(&mut self, id: TaskId) -> bool {
        let visible_order: Vec<TaskId> = self.visible().iter().map(|task| task.id).collect();
        match DragSession::begin(&visible_order, id) {
            Some(session) => {
                self.drag = Some(session);
                true
            }
            None => false,
        }
    }

    /// Moves the dragged row before/after the row under the pointer,
    /// updating the live visual order.
    pub fn drag_over(&mut self, target: TaskId, placement: DragPlacement) -> bool {
        match self.drag.as_mut() {
            Some(session) => session.move_over(target, placement),
            None => false,
        }
    }

    /// Ends the drag gesture, committing the visual order to the store.
    ///
    /// This is the one place view order flows back into the model. Tasks
    /// hidden by the active filter/search are retained by the store's
    /// reorder semantics. Returns `false` when no drag was in flight.
    pub fn end_drag(&mut self) -> ControllerResult<bool> {
        let Some(session) = self.drag.take() else {
            return Ok(false);
        };
        self.store.reorder(&session.into_order())?;
        Ok(true)
    }

    /// Abandons an in-flight drag without committing, restoring the
    /// model-driven order.
    pub fn cancel_drag(&mut self) {
        self.drag = None;
    }
}
