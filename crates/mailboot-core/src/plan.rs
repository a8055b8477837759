//! Builds the declarative list of task descriptors to install.
//!
//! Both install profiles (server only, or companion + delayed server)
//! produce a plain descriptor list that one reconciliation routine
//! processes; there is no separate code path per profile.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::PlanError;
use crate::settings::Settings;
use crate::task::{RestartPolicy, RunConditions, TaskDescriptor, Trigger};

/// The resolved install plan: descriptors in registration order.
#[derive(Debug, Clone)]
pub struct InstallPlan {
    /// Descriptors to register, companion (if any) before server.
    pub tasks: Vec<TaskDescriptor>,
    /// Resolved interpreter path, for the client-config instructions.
    pub interpreter: PathBuf,
    /// Absolute server script path.
    pub script: PathBuf,
}

/// Builds the install plan from settings.
///
/// `anchor` is the installer's own directory; relative script paths
/// resolve against it and it becomes the server's working directory.
/// `resolve` maps an executable name to an absolute path. Resolution
/// failure aborts planning with [`PlanError::PrerequisiteMissing`]
/// before any store mutation is attempted.
pub fn build(
    settings: &Settings,
    anchor: &Path,
    with_companion: bool,
    resolve: impl Fn(&str) -> Option<PathBuf>,
) -> Result<InstallPlan, PlanError> {
    let interpreter = resolve(&settings.server.interpreter)
        .ok_or_else(|| PlanError::PrerequisiteMissing(settings.server.interpreter.clone()))?;

    let script = if settings.server.script.is_absolute() {
        settings.server.script.clone()
    } else {
        anchor.join(&settings.server.script)
    };
    let working_directory = script
        .parent()
        .map_or_else(|| anchor.to_path_buf(), Path::to_path_buf);

    let run_conditions = RunConditions {
        allow_on_battery: settings.limits.allow_on_battery,
        stop_on_battery: settings.limits.stop_on_battery,
    };

    let mut tasks = Vec::new();

    if with_companion {
        let program = resolve(&settings.companion.program)
            .ok_or_else(|| PlanError::PrerequisiteMissing(settings.companion.program.clone()))?;
        tasks.push(TaskDescriptor {
            name: settings.companion.task_name.clone(),
            command: program,
            arguments: Vec::new(),
            working_directory: anchor.to_path_buf(),
            trigger: Trigger::AtLogon {
                delay: Duration::ZERO,
            },
            // The mail client manages its own lifetime; the scheduler
            // only launches it.
            restart_policy: RestartPolicy::none(),
            run_conditions,
            execution_time_limit: Duration::ZERO,
        });
    }

    tasks.push(TaskDescriptor {
        name: settings.server.task_name.clone(),
        command: interpreter.clone(),
        arguments: vec![script.display().to_string()],
        working_directory,
        trigger: Trigger::AtLogon {
            delay: Duration::from_secs(settings.server.delay_secs),
        },
        restart_policy: RestartPolicy {
            max_attempts: settings.limits.restart_attempts,
            interval: Duration::from_secs(settings.limits.restart_interval_secs),
        },
        run_conditions,
        execution_time_limit: Duration::from_secs(
            settings.limits.execution_time_limit_hours * 3600,
        ),
    });

    Ok(InstallPlan {
        tasks,
        interpreter,
        script,
    })
}
