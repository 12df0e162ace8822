//! Task-list codec and repository over a key-value adapter.
//!
//! # Responsibility
//! - Encode the full task sequence as a JSON array under one key.
//! - Decode persisted values, rejecting malformed or invalid records.
//!
//! # Invariants
//! - Encoding is order-preserving and lossless: `decode(encode(x)) == x`.
//! - An empty list is written as `[]`, never omitted.

use crate::model::task::Task;
use crate::repo::kv_store::{KvError, PersistenceAdapter};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage key used by browser builds and the default store config.
pub const TASKS_STORAGE_KEY: &str = "tasks";

pub type RepoResult<T> = Result<T, RepoError>;

/// JSON encode/decode failure.
#[derive(Debug)]
pub struct CodecError(serde_json::Error);

impl Display for CodecError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid task list payload: {}", self.0)
    }
}

impl Error for CodecError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.0)
    }
}

/// Repository error for task-list load/save.
#[derive(Debug)]
pub enum RepoError {
    Storage(KvError),
    Codec(CodecError),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(err) => write!(f, "{err}"),
            Self::Codec(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::Codec(err) => Some(err),
        }
    }
}

impl From<KvError> for RepoError {
    fn from(value: KvError) -> Self {
        Self::Storage(value)
    }
}

impl From<CodecError> for RepoError {
    fn from(value: CodecError) -> Self {
        Self::Codec(value)
    }
}

/// Serializes the task sequence as a JSON array of `{text, date, done}`.
pub fn encode_tasks(tasks: &[Task]) -> Result<String, CodecError> {
    serde_json::to_string(tasks).map_err(CodecError)
}

/// Parses a persisted JSON array back into tasks.
///
/// Records with blank text or non-ISO dates are rejected.
pub fn decode_tasks(raw: &str) -> Result<Vec<Task>, CodecError> {
    serde_json::from_str(raw).map_err(CodecError)
}

/// Loads and saves the whole task list under one key.
pub struct TaskListRepository<A: PersistenceAdapter> {
    adapter: A,
    key: String,
}

impl<A: PersistenceAdapter> TaskListRepository<A> {
    /// Creates a repository using `TASKS_STORAGE_KEY`.
    pub fn new(adapter: A) -> Self {
        Self::with_key(adapter, TASKS_STORAGE_KEY)
    }

    pub fn with_key(adapter: A, key: impl Into<String>) -> Self {
        Self {
            adapter,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    /// Reads the persisted list.
    ///
    /// Returns `Ok(None)` when nothing was ever written under the key.
    ///
    /// # Errors
    /// - `RepoError::Storage` when the adapter read fails.
    /// - `RepoError::Codec` when the stored value is malformed.
    pub fn load(&self) -> RepoResult<Option<Vec<Task>>> {
        match self.adapter.get(&self.key)? {
            Some(raw) => Ok(Some(decode_tasks(&raw)?)),
            None => Ok(None),
        }
    }

    /// Replaces the persisted value with the full encoded list.
    pub fn save(&self, tasks: &[Task]) -> RepoResult<()> {
        let encoded = encode_tasks(tasks)?;
        self.adapter.set(&self.key, &encoded)?;
        Ok(())
    }
}
