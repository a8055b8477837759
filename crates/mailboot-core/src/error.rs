use thiserror::Error;

/// Errors surfaced by a [`crate::store::TaskStore`] implementation.
///
/// Every scheduler operation reports failure through this taxonomy so
/// callers can decide what is fatal: `NotFound` is the expected outcome
/// during idempotent teardown, while `PermissionDenied` needs the user
/// to re-run from an elevated prompt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No task with the given name exists in the OS task store.
    #[error("no scheduled task named '{0}' exists")]
    NotFound(String),

    /// The invoking principal may not write scheduler entries.
    #[error("access to the task store was denied: {0}")]
    PermissionDenied(String),

    /// Any other scheduler failure (tool missing, bad exit code, ...).
    #[error("task scheduler operation failed: {0}")]
    Platform(String),
}

/// Errors detected while building an install plan, before any store
/// mutation has happened.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    /// A required executable is not on the search path.
    #[error("executable '{0}' was not found on the search path")]
    PrerequisiteMissing(String),
}
