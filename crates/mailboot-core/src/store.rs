use std::collections::HashMap;

use crate::error::StoreError;
use crate::task::TaskDescriptor;

/// Repository seam over the OS task store.
///
/// The registrar only talks to this trait; the platform crate provides
/// the real scheduler-backed implementation, and [`MemoryStore`] backs
/// unit tests. The store owns the persistent entries; the installer is
/// a one-shot client mutating state it does not hold a lease on.
pub trait TaskStore {
    /// Returns the stored descriptor for `name`, or `None` if absent.
    fn get(&self, name: &str) -> Result<Option<TaskDescriptor>, StoreError>;

    /// Creates or replaces the entry under `task.name`.
    fn put(&mut self, task: &TaskDescriptor) -> Result<(), StoreError>;

    /// Deletes the entry. Fails with [`StoreError::NotFound`] if absent.
    fn delete(&mut self, name: &str) -> Result<(), StoreError>;

    /// Stops a currently running instance of the task.
    /// Fails with [`StoreError::NotFound`] if no entry exists.
    fn stop(&mut self, name: &str) -> Result<(), StoreError>;

    /// Triggers an immediate run, independent of the normal trigger.
    /// Fails with [`StoreError::NotFound`] if no entry exists.
    fn run(&mut self, name: &str) -> Result<(), StoreError>;
}

/// In-memory task store used by unit tests in place of the scheduler.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tasks: HashMap<String, TaskDescriptor>,
    runs: Vec<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an entry exists under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.tasks.contains_key(name)
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Names passed to [`TaskStore::run`], in call order.
    pub fn runs(&self) -> &[String] {
        &self.runs
    }
}

impl TaskStore for MemoryStore {
    fn get(&self, name: &str) -> Result<Option<TaskDescriptor>, StoreError> {
        Ok(self.tasks.get(name).cloned())
    }

    fn put(&mut self, task: &TaskDescriptor) -> Result<(), StoreError> {
        self.tasks.insert(task.name.clone(), task.clone());
        Ok(())
    }

    fn delete(&mut self, name: &str) -> Result<(), StoreError> {
        self.tasks
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(name.to_string()))
    }

    fn stop(&mut self, name: &str) -> Result<(), StoreError> {
        if self.tasks.contains_key(name) {
            Ok(())
        } else {
            Err(StoreError::NotFound(name.to_string()))
        }
    }

    fn run(&mut self, name: &str) -> Result<(), StoreError> {
        if self.tasks.contains_key(name) {
            self.runs.push(name.to_string());
            Ok(())
        } else {
            Err(StoreError::NotFound(name.to_string()))
        }
    }
}
