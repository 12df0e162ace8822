//! Core logic for the dated to-do list.
//! This crate is the single source of truth for task-list invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::StoreConfig;
pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LoggingError};
pub use model::task::{Task, TaskValidationError, TASK_DATE_FORMAT};
pub use repo::kv_store::{KvError, KvResult, MemoryKvStore, PersistenceAdapter, SqliteKvStore};
pub use repo::task_list_repo::{
    decode_tasks, encode_tasks, CodecError, RepoError, TaskListRepository, TASKS_STORAGE_KEY,
};
pub use service::confirm::{
    AlwaysConfirm, ConfirmationPrompt, NeverConfirm, CLEAR_ALL_PROMPT, DELETE_TASK_PROMPT,
};
pub use service::task_list_store::{
    EditState, LoadStatus, MutationOutcome, RejectReason, StoreError, StoreResult, TaskListStore,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
