use mailboot_core::{StoreError, TaskDescriptor, TaskStore, log_debug};

use crate::{powershell, schtasks, taskxml};

/// [`TaskStore`] backed by the Windows Task Scheduler.
///
/// Registration goes through the PowerShell `ScheduledTasks` cmdlets;
/// query, stop, run, and delete go through `schtasks.exe`. Both are
/// blocking out-of-process calls, and the scheduler's own store
/// provides consistency for concurrent registrations.
#[derive(Debug, Default)]
pub struct SchtasksStore;

impl SchtasksStore {
    pub fn new() -> Self {
        Self
    }
}

impl TaskStore for SchtasksStore {
    fn get(&self, name: &str) -> Result<Option<TaskDescriptor>, StoreError> {
        match schtasks::query_xml(name) {
            Ok(xml) => taskxml::parse_descriptor(name, &xml).map(Some),
            Err(StoreError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn put(&mut self, task: &TaskDescriptor) -> Result<(), StoreError> {
        log_debug!("registering task '{}': {}", task.name, task.command_line());
        powershell::register(task)
    }

    fn delete(&mut self, name: &str) -> Result<(), StoreError> {
        log_debug!("deleting task '{name}'");
        schtasks::delete(name)
    }

    fn stop(&mut self, name: &str) -> Result<(), StoreError> {
        match schtasks::end(name) {
            Ok(()) => Ok(()),
            // /End on a task that exists but isn't running still counts
            // as stopped.
            Err(StoreError::Platform(detail))
                if detail.to_ascii_lowercase().contains("not currently running") =>
            {
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    fn run(&mut self, name: &str) -> Result<(), StoreError> {
        log_debug!("run request for task '{name}'");
        schtasks::run(name)
    }
}
