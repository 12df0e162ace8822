//! Persistence layer: key-value adapters and the task-list codec.
//!
//! # Responsibility
//! - Define the key-value contract the store persists through.
//! - Keep the JSON wire format and SQLite details out of the store.
//!
//! # Invariants
//! - The whole list is written under one key; there are no partial writes.
//! - Read paths reject invalid persisted state instead of masking it.

pub mod kv_store;
pub mod task_list_repo;
