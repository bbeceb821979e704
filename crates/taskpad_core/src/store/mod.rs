//! In-memory task collection and its write-through persistence.
//!
//! # Responsibility
//! - Own the single source of truth for task state and order.
//! - Persist the full collection after every mutation.
//!
//! # See also
//! - `crate::repo` for the snapshot contract.

pub mod task_store;
