//! Core domain logic for Taskpad, a locally persisted task list.
//! This crate is the single source of truth for business invariants.

pub mod controller;
pub mod db;
pub mod gate;
pub mod logging;
pub mod model;
pub mod repo;
pub mod store;
pub mod view;

pub use controller::exit::{
    ChannelExitAnimator, CompletionBarrier, CompletionSignal, ExitAnimator, ExitBatch,
    NoAnimations,
};
pub use controller::interaction::{ControllerError, ControllerResult, InteractionController};
pub use gate::{
    ChannelConfirmationGate, ConfirmationGate, ConfirmationRequest, GateError, GateResult,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::task::{Priority, Task, TaskId, TaskValidationError};
pub use repo::snapshot_repo::{
    RepoError, RepoResult, SnapshotRepository, SqliteSnapshotRepository,
};
pub use store::task_store::{StoreError, StoreResult, TaskStore};
pub use view::drag::{DragPlacement, DragSession};
pub use view::projection::{project, Filter};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
