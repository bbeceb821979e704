//! Task snapshot repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist the ordered task collection as one JSON blob under a fixed
//!   key in the `kv_store` table.
//! - Treat missing or malformed persisted data as an empty collection.
//!
//! # Invariants
//! - `save` always rewrites the full collection in order.
//! - `load` returns tasks in exactly the order they were saved.
//! - Loaded tasks with empty text are discarded instead of trusted.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::task::Task;
use log::{debug, warn};
use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Fixed key under which the serialized task collection lives.
const SNAPSHOT_KEY: &str = "todo_tasks";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for snapshot persistence operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    Serialize(serde_json::Error),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Serialize(err) => write!(f, "failed to serialize task snapshot: {err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}; run migrations first"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Serialize(err) => Some(err),
            Self::UninitializedConnection { .. } => None,
            Self::MissingRequiredTable(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

/// Load/save contract for the whole ordered task collection.
pub trait SnapshotRepository {
    /// Loads the persisted collection. Missing or malformed data yields an
    /// empty collection, never an error.
    fn load(&self) -> RepoResult<Vec<Task>>;

    /// Persists the full ordered collection, replacing the previous
    /// snapshot.
    fn save(&self, tasks: &[Task]) -> RepoResult<()>;
}

/// SQLite-backed snapshot repository.
pub struct SqliteSnapshotRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSnapshotRepository<'conn> {
    /// Creates a repository after verifying the connection is usable.
    ///
    /// # Errors
    /// - `UninitializedConnection` when migrations have not been applied.
    /// - `MissingRequiredTable` when `kv_store` is absent despite the
    ///   version pragma claiming otherwise.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let expected = latest_version();
        let actual: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
        if actual != expected {
            return Err(RepoError::UninitializedConnection {
                expected_version: expected,
                actual_version: actual,
            });
        }

        let table_count: u32 = conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'kv_store';",
            [],
            |row| row.get(0),
        )?;
        if table_count == 0 {
            return Err(RepoError::MissingRequiredTable("kv_store"));
        }

        Ok(Self { conn })
    }
}

impl SnapshotRepository for SqliteSnapshotRepository<'_> {
    fn load(&self) -> RepoResult<Vec<Task>> {
        let blob: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1;",
                params![SNAPSHOT_KEY],
                |row| row.get(0),
            )
            .optional()?;

        let Some(blob) = blob else {
            debug!("event=snapshot_load module=repo status=ok result=empty");
            return Ok(Vec::new());
        };

        let tasks: Vec<Task> = match serde_json::from_str(&blob) {
            Ok(tasks) => tasks,
            Err(err) => {
                // Malformed persisted data is treated as "no tasks yet".
                warn!(
                    "event=snapshot_load module=repo status=error error_code=malformed_snapshot error={err}"
                );
                return Ok(Vec::new());
            }
        };

        let total = tasks.len();
        let tasks: Vec<Task> = tasks
            .into_iter()
            .filter(|task| !task.text.trim().is_empty())
            .collect();
        if tasks.len() < total {
            warn!(
                "event=snapshot_load module=repo status=ok dropped_invalid={}",
                total - tasks.len()
            );
        }

        debug!(
            "event=snapshot_load module=repo status=ok count={}",
            tasks.len()
        );
        Ok(tasks)
    }

    fn save(&self, tasks: &[Task]) -> RepoResult<()> {
        let blob = serde_json::to_string(tasks)?;

        self.conn.execute(
            "INSERT INTO kv_store (key, value, updated_at)
             VALUES (?1, ?2, strftime('%s', 'now') * 1000)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![SNAPSHOT_KEY, blob],
        )?;

        debug!(
            "event=snapshot_save module=repo status=ok count={}",
            tasks.len()
        );
        Ok(())
    }
}
