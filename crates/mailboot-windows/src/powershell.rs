//! Task registration via the PowerShell `ScheduledTasks` cmdlets.
//!
//! Plain `schtasks /Create` cannot express restart counts, battery
//! conditions, or the execution time limit, so registration goes
//! through `Register-ScheduledTask` instead. Everything else (query,
//! stop, run, delete) stays on `schtasks`.

use std::process::Command;

use mailboot_core::{StoreError, TaskDescriptor};

use crate::iso8601;

/// Registers `task` by running the rendered cmdlet pipeline.
pub fn register(task: &TaskDescriptor) -> Result<(), StoreError> {
    let script = registration_script(task);
    let output = Command::new("powershell")
        .args([
            "-NoProfile",
            "-NonInteractive",
            "-ExecutionPolicy",
            "Bypass",
            "-Command",
            &script,
        ])
        .output()
        .map_err(|e| StoreError::Platform(format!("cannot invoke powershell: {e}")))?;

    if output.status.success() {
        return Ok(());
    }

    let detail = String::from_utf8_lossy(&output.stderr).trim().to_string();
    Err(classify(&detail))
}

/// Renders the `Register-ScheduledTask` pipeline for a descriptor.
///
/// `-Force` replaces an existing entry, so the pipeline itself is a
/// create-or-replace; the registrar's delete pre-clean still runs for
/// entries created by other tools with different settings.
pub fn registration_script(task: &TaskDescriptor) -> String {
    let mut script = String::from("$ErrorActionPreference = 'Stop'\n");

    let mut action = format!(
        "$action = New-ScheduledTaskAction -Execute {} -WorkingDirectory {}",
        quote(&task.command.display().to_string()),
        quote(&task.working_directory.display().to_string()),
    );
    if !task.arguments.is_empty() {
        action.push_str(&format!(" -Argument {}", quote(&argument_string(task))));
    }
    script.push_str(&action);
    script.push('\n');

    script.push_str("$trigger = New-ScheduledTaskTrigger -AtLogOn\n");
    let delay = task.trigger.delay();
    if !delay.is_zero() {
        script.push_str(&format!(
            "$trigger.Delay = {}\n",
            quote(&iso8601::format(delay))
        ));
    }

    let mut flags = String::new();
    if task.run_conditions.allow_on_battery {
        flags.push_str(" -AllowStartIfOnBatteries");
    }
    if !task.run_conditions.stop_on_battery {
        flags.push_str(" -DontStopIfGoingOnBatteries");
    }
    if task.restart_policy.max_attempts > 0 {
        flags.push_str(&format!(
            " -RestartCount {} -RestartInterval (New-TimeSpan -Seconds {})",
            task.restart_policy.max_attempts,
            task.restart_policy.interval.as_secs(),
        ));
    }
    // A zero time limit disables the cap entirely.
    script.push_str(&format!(
        "$settings = New-ScheduledTaskSettingsSet{flags} -ExecutionTimeLimit (New-TimeSpan -Seconds {})\n",
        task.execution_time_limit.as_secs(),
    ));

    script.push_str(&format!(
        "Register-ScheduledTask -TaskName {} -Action $action -Trigger $trigger -Settings $settings -Force | Out-Null\n",
        quote(&task.name),
    ));

    script
}

/// Maps a PowerShell diagnostic onto the store error taxonomy.
fn classify(detail: &str) -> StoreError {
    let lower = detail.to_ascii_lowercase();
    if lower.contains("access is denied") || lower.contains("unauthorizedaccess") {
        StoreError::PermissionDenied(detail.to_string())
    } else {
        StoreError::Platform(detail.to_string())
    }
}

/// Quotes a value as a PowerShell single-quoted string literal, where
/// the only escape is a doubled single quote.
fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// Joins the argument list the way the scheduler stores it: one string
/// with whitespace-containing parts double-quoted.
fn argument_string(task: &TaskDescriptor) -> String {
    task.arguments
        .iter()
        .map(|a| {
            if a.contains(' ') {
                format!("\"{a}\"")
            } else {
                a.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
