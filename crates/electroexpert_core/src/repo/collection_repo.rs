//! Collection repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide `load`/`save` of serialized record sequences by key.
//! - Keep SQL and JSON details inside the persistence boundary.
//!
//! # Invariants
//! - `save` overwrites the previous payload for the key in one statement.
//! - `load` never fails on a missing key or a payload that does not decode;
//!   only storage transport errors propagate.

use crate::db::DbError;
use crate::model::RecordValidationError;
use log::{debug, warn};
use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Error for collection persistence and store mutations.
#[derive(Debug)]
pub enum RepoError {
    Validation(RecordValidationError),
    Db(DbError),
    Encode(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::Encode(message) => write!(f, "failed to encode collection: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::Encode(_) => None,
        }
    }
}

impl From<RecordValidationError> for RepoError {
    fn from(value: RecordValidationError) -> Self {
        Self::Validation(value)
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

/// Fixed keys of the persisted collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKey {
    Tasks,
    UserSchematics,
    Settings,
}

impl CollectionKey {
    /// Key under which the snapshot is stored.
    pub fn storage_name(self) -> &'static str {
        match self {
            Self::Tasks => "ee_tasks",
            Self::UserSchematics => "ee_user_schematics",
            Self::Settings => "ee_settings",
        }
    }
}

impl Display for CollectionKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.storage_name())
    }
}

/// Whole-collection key-value persistence.
pub trait CollectionRepository {
    /// Reads the snapshot stored under `key`.
    ///
    /// Returns an empty sequence when the key is absent or its payload cannot
    /// be decoded as `Vec<T>`.
    fn load<T: DeserializeOwned>(&self, key: CollectionKey) -> RepoResult<Vec<T>>;

    /// Replaces the snapshot stored under `key` with `records`.
    fn save<T: Serialize>(&self, key: CollectionKey, records: &[T]) -> RepoResult<()>;
}

/// SQLite-backed collection repository.
///
/// Borrows an already migrated connection (see [`crate::db::open_db`]).
#[derive(Clone, Copy)]
pub struct SqliteCollectionRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCollectionRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl CollectionRepository for SqliteCollectionRepository<'_> {
    fn load<T: DeserializeOwned>(&self, key: CollectionKey) -> RepoResult<Vec<T>> {
        let payload: Option<String> = self
            .conn
            .query_row(
                "SELECT payload FROM collections WHERE key = ?1;",
                [key.storage_name()],
                |row| row.get(0),
            )
            .optional()?;

        let Some(payload) = payload else {
            debug!("event=collection_load module=repo status=absent key={key}");
            return Ok(Vec::new());
        };

        match serde_json::from_str::<Vec<T>>(&payload) {
            Ok(records) => {
                debug!(
                    "event=collection_load module=repo status=ok key={} count={}",
                    key,
                    records.len()
                );
                Ok(records)
            }
            Err(err) => {
                warn!(
                    "event=collection_load module=repo status=corrupt key={} payload_bytes={} error={}",
                    key,
                    payload.len(),
                    err
                );
                Ok(Vec::new())
            }
        }
    }

    fn save<T: Serialize>(&self, key: CollectionKey, records: &[T]) -> RepoResult<()> {
        let payload =
            serde_json::to_string(records).map_err(|err| RepoError::Encode(err.to_string()))?;

        self.conn.execute(
            "INSERT INTO collections (key, payload, updated_at)
             VALUES (?1, ?2, strftime('%s', 'now') * 1000)
             ON CONFLICT(key) DO UPDATE SET
                payload = excluded.payload,
                updated_at = excluded.updated_at;",
            params![key.storage_name(), payload],
        )?;

        debug!(
            "event=collection_save module=repo status=ok key={} count={}",
            key,
            records.len()
        );
        Ok(())
    }
}
