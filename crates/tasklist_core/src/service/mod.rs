//! Core use-case services.
//!
//! # Responsibility
//! - Own the in-memory task list and its validated mutations.
//! - Keep UI layers decoupled from storage details.

pub mod confirm;
pub mod task_list_store;
