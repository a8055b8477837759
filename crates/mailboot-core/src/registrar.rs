//! Reconciliation between desired task descriptors and the OS store.
//!
//! Registration is a replace, not an append: any prior entry under the
//! same name is stopped and deleted first, so the store never holds two
//! entries for one name and re-running the installer converges to the
//! same state.

use crate::error::StoreError;
use crate::store::TaskStore;
use crate::task::TaskDescriptor;

/// Outcome of an idempotent teardown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Teardown {
    /// An entry existed and was deleted.
    Removed,
    /// No entry existed; nothing to do.
    NotRegistered,
}

/// Registers `task`, replacing any prior entry under the same name.
///
/// The scheduler may be running the old entry concurrently with this
/// installer, so it is stopped before the entry is touched. A missing
/// entry during the pre-clean is not an error.
pub fn register(store: &mut dyn TaskStore, task: &TaskDescriptor) -> Result<(), StoreError> {
    ignore_not_found(store.stop(&task.name))?;
    ignore_not_found(store.delete(&task.name))?;
    store.put(task)
}

/// Stops and deletes the entry under `name`.
///
/// Safe to call when the task does not exist: that is the successful
/// [`Teardown::NotRegistered`] outcome, so uninstall is re-runnable.
pub fn unregister(store: &mut dyn TaskStore, name: &str) -> Result<Teardown, StoreError> {
    ignore_not_found(store.stop(name))?;
    match store.delete(name) {
        Ok(()) => Ok(Teardown::Removed),
        Err(StoreError::NotFound(_)) => Ok(Teardown::NotRegistered),
        Err(e) => Err(e),
    }
}

/// Triggers an immediate run of an already-registered task.
pub fn run_now(store: &mut dyn TaskStore, name: &str) -> Result<(), StoreError> {
    store.run(name)
}

/// Maps `NotFound` to success, propagating every other error.
fn ignore_not_found(result: Result<(), StoreError>) -> Result<(), StoreError> {
    match result {
        Ok(()) | Err(StoreError::NotFound(_)) => Ok(()),
        Err(e) => Err(e),
    }
}

/// Per-task result recorded by [`install_all`].
#[derive(Debug)]
pub struct TaskOutcome {
    pub name: String,
    pub result: Result<(), StoreError>,
}

/// Summary of one full install pass over a descriptor list.
#[derive(Debug, Default)]
pub struct InstallReport {
    outcomes: Vec<TaskOutcome>,
}

impl InstallReport {
    /// All per-task outcomes, in registration order.
    pub fn outcomes(&self) -> &[TaskOutcome] {
        &self.outcomes
    }

    /// The outcomes that failed.
    pub fn failures(&self) -> Vec<&TaskOutcome> {
        self.outcomes
            .iter()
            .filter(|o| o.result.is_err())
            .collect()
    }

    pub fn all_succeeded(&self) -> bool {
        self.outcomes.iter().all(|o| o.result.is_ok())
    }
}

/// Registers every descriptor in order.
///
/// A per-task failure is recorded and the pass continues with the
/// remaining descriptors; the caller summarizes all failures at the
/// end instead of aborting on the first one.
pub fn install_all(store: &mut dyn TaskStore, tasks: &[TaskDescriptor]) -> InstallReport {
    let mut report = InstallReport::default();
    for task in tasks {
        report.outcomes.push(TaskOutcome {
            name: task.name.clone(),
            result: register(store, task),
        });
    }
    report
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::time::Duration;

    use super::*;
    use crate::store::MemoryStore;
    use crate::task::{RestartPolicy, RunConditions, Trigger};

    fn server_task(name: &str, delay_secs: u64) -> TaskDescriptor {
        TaskDescriptor {
            name: name.into(),
            command: PathBuf::from(r"C:\Python\python.exe"),
            arguments: vec![r"C:\mailboot\server.py".into()],
            working_directory: PathBuf::from(r"C:\mailboot"),
            trigger: Trigger::AtLogon {
                delay: Duration::from_secs(delay_secs),
            },
            restart_policy: RestartPolicy {
                max_attempts: 3,
                interval: Duration::from_secs(60),
            },
            run_conditions: RunConditions::default(),
            execution_time_limit: Duration::ZERO,
        }
    }

    /// A store that rejects `put` for one task name with
    /// `PermissionDenied`, passing everything else through.
    struct DenyingStore {
        inner: MemoryStore,
        deny: String,
    }

    impl TaskStore for DenyingStore {
        fn get(&self, name: &str) -> Result<Option<TaskDescriptor>, StoreError> {
            self.inner.get(name)
        }

        fn put(&mut self, task: &TaskDescriptor) -> Result<(), StoreError> {
            if task.name == self.deny {
                return Err(StoreError::PermissionDenied("access is denied".into()));
            }
            self.inner.put(task)
        }

        fn delete(&mut self, name: &str) -> Result<(), StoreError> {
            self.inner.delete(name)
        }

        fn stop(&mut self, name: &str) -> Result<(), StoreError> {
            self.inner.stop(name)
        }

        fn run(&mut self, name: &str) -> Result<(), StoreError> {
            self.inner.run(name)
        }
    }

    #[test]
    fn register_stores_the_descriptor() {
        // Arrange
        let mut store = MemoryStore::new();
        let task = server_task("Server", 30);

        // Act
        register(&mut store, &task).unwrap();

        // Assert
        let stored = store.get("Server").unwrap().unwrap();
        assert_eq!(stored.command, task.command);
        assert_eq!(stored.arguments, task.arguments);
        assert_eq!(stored.working_directory, task.working_directory);
        assert_eq!(stored.restart_policy, task.restart_policy);
    }

    #[test]
    fn register_twice_equals_register_once() {
        // Arrange
        let mut store = MemoryStore::new();
        let task = server_task("Server", 30);

        // Act
        register(&mut store, &task).unwrap();
        register(&mut store, &task).unwrap();

        // Assert
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("Server").unwrap(), Some(task));
    }

    #[test]
    fn register_replaces_a_prior_entry() {
        // Arrange
        let mut store = MemoryStore::new();
        register(&mut store, &server_task("Server", 30)).unwrap();

        // Act
        let updated = server_task("Server", 60);
        register(&mut store, &updated).unwrap();

        // Assert
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("Server").unwrap(), Some(updated));
    }

    #[test]
    fn unregister_removes_the_entry() {
        // Arrange
        let mut store = MemoryStore::new();
        register(&mut store, &server_task("Server", 30)).unwrap();

        // Act
        let outcome = unregister(&mut store, "Server").unwrap();

        // Assert
        assert_eq!(outcome, Teardown::Removed);
        assert_eq!(store.get("Server").unwrap(), None);
    }

    #[test]
    fn unregister_on_absent_name_succeeds() {
        // Arrange
        let mut store = MemoryStore::new();

        // Act
        let outcome = unregister(&mut store, "Server").unwrap();

        // Assert
        assert_eq!(outcome, Teardown::NotRegistered);
    }

    #[test]
    fn run_now_fails_for_unregistered_task() {
        // Arrange
        let mut store = MemoryStore::new();

        // Act / Assert
        assert_eq!(
            run_now(&mut store, "Server"),
            Err(StoreError::NotFound("Server".into()))
        );
    }

    #[test]
    fn run_now_triggers_a_registered_task() {
        // Arrange
        let mut store = MemoryStore::new();
        register(&mut store, &server_task("Server", 30)).unwrap();

        // Act
        run_now(&mut store, "Server").unwrap();

        // Assert
        assert_eq!(store.runs(), ["Server"]);
    }

    #[test]
    fn install_all_registers_every_descriptor() {
        // Arrange
        let mut store = MemoryStore::new();
        let tasks = vec![server_task("Companion", 0), server_task("Server", 30)];

        // Act
        let report = install_all(&mut store, &tasks);

        // Assert
        assert!(report.all_succeeded());
        assert!(store.contains("Companion"));
        assert!(store.contains("Server"));
        assert_eq!(
            store.get("Companion").unwrap().unwrap().trigger.delay(),
            Duration::ZERO
        );
        assert_eq!(
            store.get("Server").unwrap().unwrap().trigger.delay(),
            Duration::from_secs(30)
        );
    }

    #[test]
    fn install_all_continues_past_a_denied_task() {
        // Arrange
        let mut store = DenyingStore {
            inner: MemoryStore::new(),
            deny: "Companion".into(),
        };
        let tasks = vec![server_task("Companion", 0), server_task("Server", 30)];

        // Act
        let report = install_all(&mut store, &tasks);

        // Assert: the denied task is reported, the next one still ran.
        assert!(!report.all_succeeded());
        let failures = report.failures();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].name, "Companion");
        assert!(matches!(
            failures[0].result,
            Err(StoreError::PermissionDenied(_))
        ));
        assert!(store.inner.contains("Server"));
    }
}
