//! Domain model for the to-do list.
//!
//! # Responsibility
//! - Define the canonical task record rendered by the UI layer.
//! - Keep creation/edit validation rules in one place.
//!
//! # Invariants
//! - Tasks carry no identity; list position is the only handle.
//! - A task never holds blank text or a missing date.

pub mod task;
