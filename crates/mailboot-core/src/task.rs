use std::path::PathBuf;
use std::time::Duration;

/// When the OS scheduler fires a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trigger {
    /// Fire when the user logs on, after an optional delay.
    AtLogon { delay: Duration },
}

impl Trigger {
    /// The delay between the trigger event and task start.
    pub fn delay(&self) -> Duration {
        match self {
            Self::AtLogon { delay } => *delay,
        }
    }
}

/// OS-level crash recovery for a registered task.
///
/// `max_attempts == 0` disables automatic restarts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RestartPolicy {
    pub max_attempts: u32,
    pub interval: Duration,
}

impl RestartPolicy {
    /// A policy that never restarts the task.
    pub fn none() -> Self {
        Self {
            max_attempts: 0,
            interval: Duration::ZERO,
        }
    }
}

/// Power conditions under which the task may start and keep running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunConditions {
    pub allow_on_battery: bool,
    pub stop_on_battery: bool,
}

impl Default for RunConditions {
    fn default() -> Self {
        Self {
            allow_on_battery: true,
            stop_on_battery: false,
        }
    }
}

/// The full set of parameters defining a scheduled task.
///
/// The descriptor is the unit the registrar reconciles: the OS task
/// store holds at most one entry per `name`, and registration replaces
/// any prior entry wholesale rather than patching it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDescriptor {
    /// Unique key in the OS task store.
    pub name: String,
    /// Absolute path to the executable.
    pub command: PathBuf,
    /// Arguments passed verbatim to the executable.
    pub arguments: Vec<String>,
    /// Directory the task starts in.
    pub working_directory: PathBuf,
    pub trigger: Trigger,
    pub restart_policy: RestartPolicy,
    pub run_conditions: RunConditions,
    /// Safety cap on a single run. `Duration::ZERO` means unlimited.
    pub execution_time_limit: Duration,
}

impl TaskDescriptor {
    /// The command line as the scheduler will invoke it, with
    /// whitespace-containing parts quoted.
    pub fn command_line(&self) -> String {
        let mut parts = vec![quote_part(&self.command.display().to_string())];
        parts.extend(self.arguments.iter().map(|a| quote_part(a)));
        parts.join(" ")
    }
}

/// Wraps a command-line part in double quotes when it contains spaces.
fn quote_part(part: &str) -> String {
    if part.contains(' ') {
        format!("\"{part}\"")
    } else {
        part.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(command: &str, arguments: &[&str]) -> TaskDescriptor {
        TaskDescriptor {
            name: "Example".into(),
            command: PathBuf::from(command),
            arguments: arguments.iter().map(|a| a.to_string()).collect(),
            working_directory: PathBuf::from(r"C:\mailboot"),
            trigger: Trigger::AtLogon {
                delay: Duration::from_secs(30),
            },
            restart_policy: RestartPolicy {
                max_attempts: 3,
                interval: Duration::from_secs(60),
            },
            run_conditions: RunConditions::default(),
            execution_time_limit: Duration::ZERO,
        }
    }

    #[test]
    fn command_line_joins_command_and_arguments() {
        // Arrange
        let task = descriptor(r"C:\Python\python.exe", &[r"C:\mailboot\server.py"]);

        // Act / Assert
        assert_eq!(
            task.command_line(),
            r"C:\Python\python.exe C:\mailboot\server.py"
        );
    }

    #[test]
    fn command_line_quotes_parts_with_spaces() {
        // Arrange
        let task = descriptor(r"C:\Program Files\Python\python.exe", &["run server"]);

        // Act / Assert
        assert_eq!(
            task.command_line(),
            "\"C:\\Program Files\\Python\\python.exe\" \"run server\""
        );
    }

    #[test]
    fn no_restart_policy_has_zero_attempts() {
        assert_eq!(RestartPolicy::none().max_attempts, 0);
    }
}
