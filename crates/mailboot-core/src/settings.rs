//! Installer settings loaded from `~/.config/mailboot/mailboot.toml`.
//!
//! Every field has a default, so the tool works with no settings file
//! at all; the file only overrides what the user cares about.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::log::LogConfig;

/// Top-level settings for the installer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub companion: CompanionSettings,
    pub limits: LimitSettings,
    pub log: LogConfig,
}

/// The mail-automation server task.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Name of the scheduled task in the OS store.
    pub task_name: String,
    /// Executable looked up on the search path (e.g. `python`).
    pub interpreter: String,
    /// Server script passed to the interpreter. A relative path is
    /// resolved against the installer's own directory.
    pub script: PathBuf,
    /// Seconds between logon and server start, leaving time for the
    /// companion application to come up first.
    pub delay_secs: u64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            task_name: "MailAutomationServer".into(),
            interpreter: "python".into(),
            script: PathBuf::from("outlook_mcp.py"),
            delay_secs: 30,
        }
    }
}

/// The optional companion task that launches the mail client at logon.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanionSettings {
    pub task_name: String,
    /// Executable name or full path of the companion application.
    pub program: String,
}

impl Default for CompanionSettings {
    fn default() -> Self {
        Self {
            task_name: "OutlookStartup".into(),
            program: "OUTLOOK.EXE".into(),
        }
    }
}

/// Restart, battery, and runtime limits applied to the server task.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitSettings {
    /// Automatic restart attempts after an abnormal exit.
    pub restart_attempts: u32,
    /// Seconds between restart attempts.
    pub restart_interval_secs: u64,
    /// Cap on a single run, in hours. `0` removes the cap.
    pub execution_time_limit_hours: u64,
    pub allow_on_battery: bool,
    pub stop_on_battery: bool,
}

impl Default for LimitSettings {
    fn default() -> Self {
        Self {
            restart_attempts: 3,
            restart_interval_secs: 60,
            execution_time_limit_hours: 0,
            allow_on_battery: true,
            stop_on_battery: false,
        }
    }
}

impl Settings {
    /// Clamps values to ranges the scheduler accepts and restores
    /// defaults for fields that cannot be empty.
    pub fn validate(&mut self) {
        if self.server.task_name.trim().is_empty() {
            self.server.task_name = ServerSettings::default().task_name;
        }
        if self.companion.task_name.trim().is_empty() {
            self.companion.task_name = CompanionSettings::default().task_name;
        }
        // schtasks rejects logon delays above one hour.
        self.server.delay_secs = self.server.delay_secs.min(3600);
        // The scheduler UI caps restart counts at 999.
        self.limits.restart_attempts = self.limits.restart_attempts.min(999);
        if self.limits.restart_attempts > 0 && self.limits.restart_interval_secs == 0 {
            self.limits.restart_interval_secs = LimitSettings::default().restart_interval_secs;
        }
    }
}

/// Returns the settings directory: `~/.config/mailboot/`.
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".config").join("mailboot"))
}

/// Returns the settings file path: `~/.config/mailboot/mailboot.toml`.
pub fn settings_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("mailboot.toml"))
}

/// Tries to load and parse `mailboot.toml`.
///
/// Returns `Ok(Settings)` on success, or an error string describing
/// what went wrong (IO error, parse error, etc.).
pub fn try_load() -> Result<Settings, String> {
    let path = settings_path().ok_or("could not determine settings path")?;
    let content = std::fs::read_to_string(&path).map_err(|e| format!("{}: {e}", path.display()))?;
    let mut settings: Settings =
        toml::from_str(&content).map_err(|e| format!("{}: {e}", path.display()))?;
    settings.validate();
    Ok(settings)
}

/// Loads the settings from disk, falling back to defaults.
///
/// A missing file silently returns defaults; other errors are printed
/// as warnings before falling back.
pub fn load() -> Settings {
    match settings_path() {
        Some(path) if !path.exists() => default_settings(),
        Some(_) => match try_load() {
            Ok(settings) => settings,
            Err(e) => {
                eprintln!("Warning: {e}");
                default_settings()
            }
        },
        None => default_settings(),
    }
}

fn default_settings() -> Settings {
    let mut settings = Settings::default();
    settings.validate();
    settings
}

/// Generates the commented default `mailboot.toml` written by
/// `mailboot init`.
pub fn generate_template() -> String {
    let d = Settings::default();
    format!(
        r#"# mailboot settings
# Delete any line to fall back to the built-in default.

[server]
# Name of the scheduled task registered for the server.
task_name = "{server_task}"
# Interpreter looked up on PATH at install time.
interpreter = "{interpreter}"
# Server script; a relative path is resolved against the directory
# the mailboot executable lives in.
script = "{script}"
# Seconds between logon and server start.
delay_secs = {delay}

[companion]
# Used only with 'mailboot install --with-outlook'.
task_name = "{companion_task}"
program = "{program}"

[limits]
# Automatic restarts after the server exits abnormally.
restart_attempts = {attempts}
restart_interval_secs = {interval}
# Cap on a single run, in hours. 0 removes the cap.
execution_time_limit_hours = {limit}
allow_on_battery = {allow_battery}
stop_on_battery = {stop_battery}

[log]
# File logging to ~/.config/mailboot/logs/mailboot.log.
enabled = false
level = "info"
max_file_mb = 10
"#,
        server_task = d.server.task_name,
        interpreter = d.server.interpreter,
        script = d.server.script.display(),
        delay = d.server.delay_secs,
        companion_task = d.companion.task_name,
        program = d.companion.program,
        attempts = d.limits.restart_attempts,
        interval = d.limits.restart_interval_secs,
        limit = d.limits.execution_time_limit_hours,
        allow_battery = d.limits.allow_on_battery,
        stop_battery = d.limits.stop_on_battery,
    )
}
