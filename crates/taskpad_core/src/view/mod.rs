//! View derivation over the task collection.
//!
//! # Responsibility
//! - Project the displayed subset/order from filter and search state.
//! - Track the transient visual order of an in-flight drag gesture.
//!
//! # Invariants
//! - Projection never reorders; it only filters.
//! - Drag overlays touch model order only when committed at drag end.

pub mod drag;
pub mod projection;
