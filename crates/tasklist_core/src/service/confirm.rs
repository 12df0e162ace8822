//! Confirmation collaborator gating destructive operations.

/// Message shown before removing one task.
pub const DELETE_TASK_PROMPT: &str = "Are you sure you want to delete this task?";
/// Message shown before removing every task.
pub const CLEAR_ALL_PROMPT: &str = "Are you sure you want to delete all tasks?";

/// Blocking yes/no query owned by the UI layer.
pub trait ConfirmationPrompt {
    fn confirm(&mut self, message: &str) -> bool;
}

impl<F: FnMut(&str) -> bool> ConfirmationPrompt for F {
    fn confirm(&mut self, message: &str) -> bool {
        self(message)
    }
}

/// Prompt that always answers yes.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysConfirm;

impl ConfirmationPrompt for AlwaysConfirm {
    fn confirm(&mut self, _message: &str) -> bool {
        true
    }
}

/// Prompt that always answers no.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverConfirm;

impl ConfirmationPrompt for NeverConfirm {
    fn confirm(&mut self, _message: &str) -> bool {
        false
    }
}
