pub mod error;
pub mod log;
pub mod plan;
pub mod registrar;
pub mod settings;
pub mod store;
pub mod task;

pub use error::{PlanError, StoreError};
pub use plan::InstallPlan;
pub use store::{MemoryStore, TaskStore};
pub use task::{RestartPolicy, RunConditions, TaskDescriptor, Trigger};
