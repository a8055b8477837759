use std::process::Command;

use mailboot_core::{TaskDescriptor, TaskStore, plan, settings};
use mailboot_windows::{SchtasksStore, resolve_executable};

/// ANSI escape helpers for doctor output.
const OK: &str = "\x1b[32m[ok]\x1b[0m";
const WARN: &str = "\x1b[33m[warn]\x1b[0m";
const FAIL: &str = "\x1b[31m[fail]\x1b[0m";
const FIXED: &str = "\x1b[36m[fixed]\x1b[0m";

pub fn execute() {
    super::banner::print_logo();
    println!();
    check_config_dir();
    check_settings_file();
    let settings = settings::load();
    check_interpreter(&settings);
    check_script(&settings);
    check_scheduler_tools();
    check_registrations(&settings);
    println!();
}

fn check_config_dir() {
    match settings::config_dir() {
        Some(dir) if dir.is_dir() => {
            println!("  {OK} Config directory exists ({})", dir.display());
        }
        Some(dir) => match std::fs::create_dir_all(&dir) {
            Ok(()) => {
                println!("  {FIXED} Created config directory ({})", dir.display());
            }
            Err(e) => {
                println!("  {FAIL} Config directory missing and could not create it: {e}");
            }
        },
        None => {
            println!("  {FAIL} Could not determine home directory");
        }
    }
}

fn check_settings_file() {
    let Some(path) = settings::settings_path() else {
        println!("  {FAIL} Could not determine settings path");
        return;
    };
    if !path.exists() {
        println!("  {WARN} mailboot.toml not found (using defaults)");
        return;
    }
    match settings::try_load() {
        Ok(_) => println!("  {OK} mailboot.toml is valid"),
        Err(e) => println!("  {FAIL} mailboot.toml: {e}"),
    }
}

fn check_interpreter(settings: &settings::Settings) {
    let name = &settings.server.interpreter;
    match resolve_executable(name) {
        Some(path) => println!("  {OK} Interpreter '{name}' found ({})", path.display()),
        None => println!("  {FAIL} Interpreter '{name}' not found on PATH"),
    }
}

fn check_script(settings: &settings::Settings) {
    let script = if settings.server.script.is_absolute() {
        settings.server.script.clone()
    } else {
        super::install::anchor_dir().join(&settings.server.script)
    };
    if script.is_file() {
        println!("  {OK} Server script exists ({})", script.display());
    } else {
        println!("  {FAIL} Server script not found ({})", script.display());
    }
}

fn check_scheduler_tools() {
    if Command::new("schtasks").arg("/?").output().is_ok() {
        println!("  {OK} schtasks is available");
    } else {
        println!("  {FAIL} schtasks could not be invoked");
    }
    let powershell = Command::new("powershell")
        .args(["-NoProfile", "-NonInteractive", "-Command", "exit 0"])
        .output();
    if powershell.is_ok() {
        println!("  {OK} powershell is available");
    } else {
        println!("  {FAIL} powershell could not be invoked");
    }
}

fn check_registrations(settings: &settings::Settings) {
    let store = SchtasksStore::new();

    let desired = plan::build(
        settings,
        &super::install::anchor_dir(),
        false,
        resolve_executable,
    )
    .ok()
    .and_then(|p| p.tasks.into_iter().next());

    let server = &settings.server.task_name;
    match store.get(server) {
        Ok(Some(stored)) => match desired {
            Some(ref want) if differs(want, &stored) => {
                println!("  {WARN} Task '{server}' is registered but differs from");
                println!("         the configured settings (re-run 'mailboot install')");
            }
            _ => println!("  {OK} Task '{server}' is registered"),
        },
        Ok(None) => println!("  {WARN} Task '{server}' is not registered"),
        Err(e) => println!("  {FAIL} Cannot query task '{server}': {e}"),
    }

    let companion = &settings.companion.task_name;
    match store.get(companion) {
        Ok(Some(_)) => println!("  {OK} Companion task '{companion}' is registered"),
        Ok(None) => {
            println!("  {WARN} Companion task '{companion}' is not registered (optional)");
        }
        Err(e) => println!("  {FAIL} Cannot query task '{companion}': {e}"),
    }
}

/// Whether the stored entry drifted from the desired descriptor.
fn differs(want: &TaskDescriptor, stored: &TaskDescriptor) -> bool {
    want.command != stored.command
        || want.arguments != stored.arguments
        || want.working_directory != stored.working_directory
        || want.trigger != stored.trigger
        || want.restart_policy != stored.restart_policy
        || want.run_conditions != stored.run_conditions
}
