//! Transient visual-order overlay for drag-and-drop reordering.
//!
//! # Responsibility
//! - Track the row order shown while a drag gesture is in flight.
//! - Produce the final id sequence to commit to the store at drag end.
//!
//! # Invariants
//! - The overlay is always a permutation of the rows it was seeded with.
//! - Model order is untouched until the session's order is committed.

use crate::model::task::TaskId;

/// Whether the dragged row lands before or after the row under the
/// pointer. The presentation layer decides this from the pointer position
/// relative to the target row's vertical midpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPlacement {
    Before,
    After,
}

/// One in-flight drag gesture over the currently visible rows.
#[derive(Debug, Clone)]
pub struct DragSession {
    order: Vec<TaskId>,
    dragged: TaskId,
}

impl DragSession {
    /// Starts a session over the visible row order.
    ///
    /// Returns `None` when the dragged id is not among the visible rows.
    pub fn begin(visible_order: &[TaskId], dragged: TaskId) -> Option<Self> {
        if !visible_order.contains(&dragged) {
            return None;
        }
        Some(Self {
            order: visible_order.to_vec(),
            dragged,
        })
    }

    /// Id of the row being dragged.
    pub fn dragged(&self) -> TaskId {
        self.dragged
    }

    /// Current visual order, updated live while the gesture moves.
    pub fn order(&self) -> &[TaskId] {
        &self.order
    }

    /// Displaces the dragged row before or after `target`.
    ///
    /// Dragging over itself or over an id outside the session is a no-op.
    /// Returns whether the visual order changed.
    pub fn move_over(&mut self, target: TaskId, placement: DragPlacement) -> bool {
        if target == self.dragged {
            return false;
        }
        let Some(target_index) = self.order.iter().position(|id| *id == target) else {
            return false;
        };
        let dragged_index = self
            .order
            .iter()
            .position(|id| *id == self.dragged)
            .unwrap_or(target_index);

        self.order.remove(dragged_index);
        // Target may have shifted left after the removal.
        let mut insert_at = self
            .order
            .iter()
            .position(|id| *id == target)
            .unwrap_or(self.order.len());
        if placement == DragPlacement::After {
            insert_at += 1;
        }
        let changed = insert_at != dragged_index;
        self.order.insert(insert_at, self.dragged);
        changed
    }

    /// Consumes the session, yielding the final visual order to commit.
    pub fn into_order(self) -> Vec<TaskId> {
        self.order
    }
}

#[cfg(test)]
mod tests {
    use super::{DragPlacement, DragSession};
    use crate::model::task::TaskId;
    use uuid::Uuid;

    fn ids(n: usize) -> Vec<TaskId> {
        (0..n).map(|_| Uuid::new_v4()).collect()
    }

    #[test]
    fn begin_requires_dragged_row_to_be_visible() {
        let rows = ids(3);
        assert!(DragSession::begin(&rows, rows[1]).is_some());
        assert!(DragSession::begin(&rows, Uuid::new_v4()).is_none());
    }

    #[test]
    fn move_before_and_after_displace_the_dragged_row() {
        let rows = ids(4);
        let mut session = DragSession::begin(&rows, rows[0]).unwrap();

        assert!(session.move_over(rows[2], DragPlacement::After));
        assert_eq!(session.order(), &[rows[1], rows[2], rows[0], rows[3]]);

        assert!(session.move_over(rows[1], DragPlacement::Before));
        assert_eq!(session.order(), &[rows[0], rows[1], rows[2], rows[3]]);
    }

    #[test]
    fn moving_over_self_or_unknown_row_changes_nothing() {
        let rows = ids(3);
        let mut session = DragSession::begin(&rows, rows[1]).unwrap();

        assert!(!session.move_over(rows[1], DragPlacement::Before));
        assert!(!session.move_over(Uuid::new_v4(), DragPlacement::After));
        assert_eq!(session.order(), rows.as_slice());
    }
}
