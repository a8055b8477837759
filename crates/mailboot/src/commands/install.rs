use std::path::{Path, PathBuf};

use mailboot_core::plan::InstallPlan;
use mailboot_core::{
    PlanError, StoreError, log, log_error, log_info, log_warn, plan, registrar, settings,
};
use mailboot_windows::{SchtasksStore, resolve_executable};

const OK: &str = "\x1b[32m[ok]\x1b[0m";
const FAIL: &str = "\x1b[31m[fail]\x1b[0m";

/// Registers the configured autostart tasks, replacing any prior
/// registrations under the same names.
///
/// With `with_outlook`, a companion task launching the mail client at
/// logon is registered ahead of the delayed server task. Per-task
/// failures don't abort the pass; they are summarized at the end and
/// the process exits 1 if any task failed.
pub fn execute(with_outlook: bool, yes: bool, no_start: bool) {
    let settings = settings::load();
    log::init(&settings.log);

    // Attended means no automation flag was given; only then do we
    // prompt and pause.
    let attended = !yes && !no_start;

    super::banner::print_logo();
    println!();

    let anchor = anchor_dir();
    let plan = match plan::build(&settings, &anchor, with_outlook, resolve_executable) {
        Ok(plan) => plan,
        Err(PlanError::PrerequisiteMissing(name)) => {
            eprintln!("Error: '{name}' was not found on PATH.");
            eprintln!("Install it and make sure it is reachable from this terminal,");
            eprintln!("then re-run 'mailboot install'.");
            log_error!("install aborted: '{name}' not on PATH");
            if attended {
                super::prompt::pause();
            }
            std::process::exit(1);
        }
    };

    println!("Registering {} scheduled task(s)...", plan.tasks.len());
    let mut store = SchtasksStore::new();
    let report = registrar::install_all(&mut store, &plan.tasks);

    let mut denied = false;
    for outcome in report.outcomes() {
        match &outcome.result {
            Ok(()) => {
                println!("  {OK} {}", outcome.name);
                log_info!("registered task '{}'", outcome.name);
            }
            Err(e) => {
                println!("  {FAIL} {}: {e}", outcome.name);
                log_warn!("failed to register task '{}': {e}", outcome.name);
                if matches!(e, StoreError::PermissionDenied(_)) {
                    denied = true;
                }
            }
        }
    }
    if denied {
        eprintln!();
        eprintln!("Hint: registering scheduled tasks usually requires an elevated");
        eprintln!("(Administrator) prompt. Re-run 'mailboot install' from one.");
    }

    print_client_config(&plan);

    let failures = report.failures();
    if !failures.is_empty() {
        eprintln!();
        eprintln!(
            "{} of {} task(s) failed to register:",
            failures.len(),
            report.outcomes().len()
        );
        for failure in &failures {
            eprintln!("  - {}", failure.name);
        }
        if attended {
            super::prompt::pause();
        }
        std::process::exit(1);
    }

    println!();
    println!("All tasks registered. The server will start at the next logon.");

    let start_now = if no_start {
        false
    } else if yes {
        true
    } else {
        super::prompt::confirm("Start the server task now?")
    };

    if start_now {
        match registrar::run_now(&mut store, &settings.server.task_name) {
            Ok(()) => {
                println!("Run request sent for '{}'.", settings.server.task_name);
                log_info!("started task '{}'", settings.server.task_name);
            }
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
    }
}

/// The installer's own directory. Relative script paths resolve here,
/// and it becomes the default working directory of the server task.
pub(super) fn anchor_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Prints the stanza the user adds to their MCP client configuration.
/// Documentation output only; nothing reads it back.
fn print_client_config(plan: &InstallPlan) {
    let stanza = serde_json::json!({
        "mcpServers": {
            "outlook-mail": {
                "command": plan.interpreter.display().to_string(),
                "args": [plan.script.display().to_string()],
            }
        }
    });

    println!();
    println!("Add this stanza to your MCP client configuration so the client");
    println!("can reach the server over stdio:");
    println!();
    if let Ok(rendered) = serde_json::to_string_pretty(&stanza) {
        for line in rendered.lines() {
            println!("  {line}");
        }
    }
}
