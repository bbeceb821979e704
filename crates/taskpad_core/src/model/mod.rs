//! Domain model for the task collection.
//!
//! # Responsibility
//! - Define the canonical task record and its creation-time validation.
//!
//! # Invariants
//! - Every task is identified by a stable `TaskId`.
//! - Task text is never empty once a task exists.

pub mod task;
