//! Interaction orchestration between user affordances and the task store.
//!
//! # Responsibility
//! - Route user actions through confirmation and exit sequencing into
//!   store mutations.
//! - Keep view state (filter, search, drag overlay) alongside the store.
//!
//! # See also
//! - `crate::gate` for the confirmation primitive.

pub mod exit;
pub mod interaction;
