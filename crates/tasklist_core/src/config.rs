//! Store configuration.

use crate::repo::task_list_repo::TASKS_STORAGE_KEY;

/// Settings applied when a `TaskListStore` is opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Key the whole task list is persisted under.
    pub storage_key: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_key: TASKS_STORAGE_KEY.to_string(),
        }
    }
}

impl StoreConfig {
    /// Config with a custom storage key; blank keys fall back to the default.
    pub fn with_storage_key(key: &str) -> Self {
        let key = key.trim();
        if key.is_empty() {
            return Self::default();
        }
        Self {
            storage_key: key.to_string(),
        }
    }
}
