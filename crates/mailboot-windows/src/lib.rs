/// ISO 8601 duration strings as used by the Task Scheduler.
pub mod iso8601;

/// `Register-ScheduledTask` pipeline rendering and execution.
pub mod powershell;

/// Executable lookup on the search path.
pub mod resolve;

/// Thin wrappers around `schtasks.exe` invocations.
pub mod schtasks;

/// The scheduler-backed [`mailboot_core::TaskStore`].
pub mod store;

/// Field extraction from `schtasks /Query /XML` output.
pub mod taskxml;

pub use resolve::resolve_executable;
pub use store::SchtasksStore;
