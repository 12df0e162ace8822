//! Task domain model.
//!
//! # Responsibility
//! - Define the persisted `{text, date, done}` record.
//! - Validate raw UI input before a task is created or edited.
//!
//! # Invariants
//! - `text` is never empty after trimming.
//! - `date` is a calendar date serialized as `YYYY-MM-DD`.
//! - New tasks start with `done == false`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Wire format for task dates.
pub const TASK_DATE_FORMAT: &str = "%Y-%m-%d";

/// Validation errors for task text/date input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    /// Text is empty or whitespace only.
    EmptyText,
    /// Date input is empty.
    EmptyDate,
    /// Date input is not an ISO calendar date.
    InvalidDate(String),
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyText => write!(f, "task text cannot be empty"),
            Self::EmptyDate => write!(f, "task date cannot be empty"),
            Self::InvalidDate(value) => {
                write!(f, "task date `{value}` is not a YYYY-MM-DD calendar date")
            }
        }
    }
}

impl Error for TaskValidationError {}

/// One to-do entry.
///
/// Serialized with the exact field names `text`, `date` and `done`, so
/// values written by earlier browser builds load unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TaskRecord")]
pub struct Task {
    /// Trimmed, non-empty description.
    pub text: String,
    /// Due date.
    pub date: NaiveDate,
    /// Completion flag.
    pub done: bool,
}

#[derive(Deserialize)]
struct TaskRecord {
    text: String,
    date: NaiveDate,
    #[serde(default)]
    done: bool,
}

impl TryFrom<TaskRecord> for Task {
    type Error = TaskValidationError;

    fn try_from(record: TaskRecord) -> Result<Self, Self::Error> {
        let task = Self {
            text: record.text,
            date: record.date,
            done: record.done,
        };
        task.validate()?;
        Ok(task)
    }
}

impl Task {
    /// Creates a pending task from raw UI input.
    ///
    /// # Invariants
    /// - Stored text is `text.trim()`.
    /// - `done` starts as `false`.
    ///
    /// # Errors
    /// - Returns `EmptyText` / `EmptyDate` / `InvalidDate` when input is unusable.
    pub fn new(text: &str, date: &str) -> Result<Self, TaskValidationError> {
        let (text, date) = validate_task_input(text, date)?;
        Ok(Self {
            text,
            date,
            done: false,
        })
    }

    /// Re-checks an already constructed task.
    ///
    /// Used on decode paths, where values may come from older writers.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.text.trim().is_empty() {
            return Err(TaskValidationError::EmptyText);
        }
        Ok(())
    }

    /// Date in wire format.
    pub fn date_string(&self) -> String {
        self.date.format(TASK_DATE_FORMAT).to_string()
    }
}

/// Validates raw text/date input shared by add and edit flows.
///
/// Returns the trimmed text and the parsed date.
pub fn validate_task_input(
    text: &str,
    date: &str,
) -> Result<(String, NaiveDate), TaskValidationError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(TaskValidationError::EmptyText);
    }
    Ok((text.to_string(), parse_task_date(date)?))
}

/// Parses one `YYYY-MM-DD` date input.
pub fn parse_task_date(value: &str) -> Result<NaiveDate, TaskValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(TaskValidationError::EmptyDate);
    }
    NaiveDate::parse_from_str(value, TASK_DATE_FORMAT)
        .map_err(|_| TaskValidationError::InvalidDate(value.to_string()))
}
