//! Task list store: the authoritative in-memory list plus its mutations.
//!
//! # Responsibility
//! - Hydrate the list from a persistence adapter once, at open.
//! - Apply validated add/edit/toggle/delete/mark-all/clear mutations.
//! - Re-persist the full list after every applied mutation.
//! - Track the single-row editing sub-state rendered by the UI.
//!
//! # Invariants
//! - List order is insertion order; positions are the only task handle.
//! - Rejected and declined operations change nothing and write nothing.
//! - Every applied mutation writes the whole list, even when it is empty.
//! - Editing is left only by a successful commit, or when the edited row
//!   is removed from the list.

use crate::config::StoreConfig;
use crate::model::task::{validate_task_input, Task, TaskValidationError};
use crate::repo::kv_store::PersistenceAdapter;
use crate::repo::task_list_repo::{RepoError, TaskListRepository};
use crate::service::confirm::{ConfirmationPrompt, CLEAR_ALL_PROMPT, DELETE_TASK_PROMPT};
use log::{debug, error, info, warn};
use std::cmp::Ordering;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence failures surfaced by the store.
#[derive(Debug)]
pub enum StoreError {
    /// Reading the persisted list at open failed.
    Load(RepoError),
    /// Writing the list after a mutation failed. The in-memory change is kept.
    Persist(RepoError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Load(err) => write!(f, "failed to load tasks: {err}"),
            Self::Persist(err) => write!(f, "failed to persist tasks: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Load(err) | Self::Persist(err) => Some(err),
        }
    }
}

/// Why an operation turned into a no-op.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    Invalid(TaskValidationError),
    IndexOutOfRange { index: usize, len: usize },
    NotEditing,
}

/// Result of one store operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOutcome {
    /// The list changed and was fully re-persisted.
    Applied,
    /// Silent no-op: nothing changed, nothing was written.
    Rejected(RejectReason),
    /// The confirmation prompt answered no.
    Declined,
}

impl MutationOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// How the list was obtained at open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    /// Nothing stored under the key yet.
    Empty,
    Loaded { count: usize },
    /// Stored value was malformed; the store started empty instead.
    Recovered { error: String },
}

/// Editing sub-state shown by the UI.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EditState {
    #[default]
    Viewing,
    Editing {
        index: usize,
        draft_text: String,
        /// Raw date input; parsed on commit.
        draft_date: String,
    },
}

impl EditState {
    pub fn editing_index(&self) -> Option<usize> {
        match self {
            Self::Viewing => None,
            Self::Editing { index, .. } => Some(*index),
        }
    }
}

/// Owns the ordered task list and mirrors it into a persistence adapter.
pub struct TaskListStore<A: PersistenceAdapter> {
    repo: TaskListRepository<A>,
    tasks: Vec<Task>,
    edit: EditState,
    load_status: LoadStatus,
}

impl<A: PersistenceAdapter> TaskListStore<A> {
    /// Opens a store under the default `tasks` key.
    pub fn open(adapter: A) -> StoreResult<Self> {
        Self::open_with_config(adapter, &StoreConfig::default())
    }

    /// Opens a store and hydrates it from the adapter.
    ///
    /// A malformed stored value is not fatal: the store starts empty and
    /// reports `LoadStatus::Recovered`. The bad value stays untouched until
    /// the next applied mutation overwrites it.
    ///
    /// # Errors
    /// - `StoreError::Load` when the adapter itself cannot be read.
    pub fn open_with_config(adapter: A, config: &StoreConfig) -> StoreResult<Self> {
        let repo = TaskListRepository::with_key(adapter, config.storage_key.as_str());
        let (tasks, load_status) = match repo.load() {
            Ok(Some(tasks)) => {
                let count = tasks.len();
                (tasks, LoadStatus::Loaded { count })
            }
            Ok(None) => (Vec::new(), LoadStatus::Empty),
            Err(RepoError::Codec(err)) => {
                warn!(
                    "event=store_open module=store status=recovered key={} error={}",
                    repo.key(),
                    err
                );
                (
                    Vec::new(),
                    LoadStatus::Recovered {
                        error: err.to_string(),
                    },
                )
            }
            Err(err) => {
                error!(
                    "event=store_open module=store status=error key={} error={}",
                    repo.key(),
                    err
                );
                return Err(StoreError::Load(err));
            }
        };

        info!(
            "event=store_open module=store status=ok key={} count={}",
            repo.key(),
            tasks.len()
        );

        Ok(Self {
            repo,
            tasks,
            edit: EditState::Viewing,
            load_status,
        })
    }

    /// Current ordered task list.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn done_count(&self) -> usize {
        self.tasks.iter().filter(|task| task.done).count()
    }

    pub fn pending_count(&self) -> usize {
        self.len() - self.done_count()
    }

    pub fn edit_state(&self) -> &EditState {
        &self.edit
    }

    pub fn load_status(&self) -> &LoadStatus {
        &self.load_status
    }

    pub fn adapter(&self) -> &A {
        self.repo.adapter()
    }

    /// Appends a pending task built from raw input.
    ///
    /// Blank text or a missing/invalid date is a silent `Rejected` no-op.
    pub fn add_task(&mut self, text: &str, date: &str) -> StoreResult<MutationOutcome> {
        let task = match Task::new(text, date) {
            Ok(task) => task,
            Err(err) => return Ok(self.reject("task_add", RejectReason::Invalid(err))),
        };
        self.tasks.push(task);
        self.persist("task_add")
    }

    /// Removes the task at `index` after an affirmative confirmation.
    ///
    /// Out-of-range indices are rejected without asking.
    pub fn delete_task(
        &mut self,
        index: usize,
        prompt: &mut impl ConfirmationPrompt,
    ) -> StoreResult<MutationOutcome> {
        if let Err(reason) = self.check_index(index) {
            return Ok(self.reject("task_delete", reason));
        }
        if !prompt.confirm(DELETE_TASK_PROMPT) {
            info!("event=task_delete module=store status=declined index={index}");
            return Ok(MutationOutcome::Declined);
        }

        self.tasks.remove(index);
        self.follow_removed_row(index);
        self.persist("task_delete")
    }

    /// Enters editing for `index`, seeding drafts with the current values.
    ///
    /// Switching rows while already editing discards the previous drafts.
    pub fn begin_edit(&mut self, index: usize) -> Result<(), RejectReason> {
        self.check_index(index)?;
        let task = &self.tasks[index];
        self.edit = EditState::Editing {
            index,
            draft_text: task.text.clone(),
            draft_date: task.date_string(),
        };
        debug!("event=edit_begin module=store status=ok index={index}");
        Ok(())
    }

    /// Replaces the draft text of the row being edited.
    pub fn set_draft_text(&mut self, text: &str) -> Result<(), RejectReason> {
        match &mut self.edit {
            EditState::Editing { draft_text, .. } => {
                *draft_text = text.to_string();
                Ok(())
            }
            EditState::Viewing => Err(RejectReason::NotEditing),
        }
    }

    /// Replaces the draft date of the row being edited.
    pub fn set_draft_date(&mut self, date: &str) -> Result<(), RejectReason> {
        match &mut self.edit {
            EditState::Editing { draft_date, .. } => {
                *draft_date = date.to_string();
                Ok(())
            }
            EditState::Viewing => Err(RejectReason::NotEditing),
        }
    }

    /// Validates the drafts and writes them into the edited row.
    ///
    /// On validation failure the store stays in editing with drafts intact.
    /// On success `done` is preserved and the store returns to viewing.
    pub fn commit_edit(&mut self) -> StoreResult<MutationOutcome> {
        let (index, text, date) = match &self.edit {
            EditState::Viewing => {
                return Ok(self.reject("edit_commit", RejectReason::NotEditing));
            }
            EditState::Editing {
                index,
                draft_text,
                draft_date,
            } => match validate_task_input(draft_text, draft_date) {
                Ok((text, date)) => (*index, text, date),
                Err(err) => return Ok(self.reject("edit_commit", RejectReason::Invalid(err))),
            },
        };
        if let Err(reason) = self.check_index(index) {
            return Ok(self.reject("edit_commit", reason));
        }

        let task = &mut self.tasks[index];
        task.text = text;
        task.date = date;
        self.edit = EditState::Viewing;
        self.persist("edit_commit")
    }

    /// Edits one row in a single call: begin, set both drafts, commit.
    ///
    /// Invalid input leaves the store editing `index` with the given drafts.
    pub fn edit_task(
        &mut self,
        index: usize,
        new_text: &str,
        new_date: &str,
    ) -> StoreResult<MutationOutcome> {
        if let Err(reason) = self.check_index(index) {
            return Ok(self.reject("edit_commit", reason));
        }
        self.edit = EditState::Editing {
            index,
            draft_text: new_text.to_string(),
            draft_date: new_date.to_string(),
        };
        self.commit_edit()
    }

    /// Flips `done` on the task at `index`.
    pub fn toggle_done(&mut self, index: usize) -> StoreResult<MutationOutcome> {
        if let Err(reason) = self.check_index(index) {
            return Ok(self.reject("task_toggle", reason));
        }
        let task = &mut self.tasks[index];
        task.done = !task.done;
        self.persist("task_toggle")
    }

    /// Sets every task to one uniform completion value.
    ///
    /// If every task is already done, all become pending; otherwise all
    /// become done. An empty list counts as all done and is re-persisted.
    pub fn mark_all_done(&mut self) -> StoreResult<MutationOutcome> {
        let all_done = self.tasks.iter().all(|task| task.done);
        for task in &mut self.tasks {
            task.done = !all_done;
        }
        self.persist("task_mark_all")
    }

    /// Empties the list after an affirmative confirmation.
    pub fn clear_all(
        &mut self,
        prompt: &mut impl ConfirmationPrompt,
    ) -> StoreResult<MutationOutcome> {
        if !prompt.confirm(CLEAR_ALL_PROMPT) {
            info!("event=task_clear module=store status=declined");
            return Ok(MutationOutcome::Declined);
        }
        self.tasks.clear();
        self.edit = EditState::Viewing;
        self.persist("task_clear")
    }

    fn check_index(&self, index: usize) -> Result<(), RejectReason> {
        if index < self.tasks.len() {
            Ok(())
        } else {
            Err(RejectReason::IndexOutOfRange {
                index,
                len: self.tasks.len(),
            })
        }
    }

    // Keeps the edit cursor on the same task after a removal.
    fn follow_removed_row(&mut self, removed: usize) {
        self.edit = match std::mem::take(&mut self.edit) {
            EditState::Editing {
                index,
                draft_text,
                draft_date,
            } => match index.cmp(&removed) {
                Ordering::Less => EditState::Editing {
                    index,
                    draft_text,
                    draft_date,
                },
                Ordering::Greater => EditState::Editing {
                    index: index - 1,
                    draft_text,
                    draft_date,
                },
                Ordering::Equal => EditState::Viewing,
            },
            EditState::Viewing => EditState::Viewing,
        };
    }

    fn reject(&self, event: &'static str, reason: RejectReason) -> MutationOutcome {
        debug!("event={event} module=store status=rejected reason={reason:?}");
        MutationOutcome::Rejected(reason)
    }

    fn persist(&self, event: &'static str) -> StoreResult<MutationOutcome> {
        match self.repo.save(&self.tasks) {
            Ok(()) => {
                info!(
                    "event={} module=store status=ok count={} done={}",
                    event,
                    self.tasks.len(),
                    self.done_count()
                );
                Ok(MutationOutcome::Applied)
            }
            Err(err) => {
                error!("event={event} module=store status=error error={err}");
                Err(StoreError::Persist(err))
            }
        }
    }
}
