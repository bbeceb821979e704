//! Persistence layer abstractions and SQLite implementation.
//!
//! # Responsibility
//! - Define the snapshot load/save contract used by the task store.
//! - Isolate serialization and SQL details from business orchestration.
//!
//! # Invariants
//! - The whole ordered collection is written as one blob per save.
//! - Loading never fails the caller over missing or malformed data.

pub mod snapshot_repo;
