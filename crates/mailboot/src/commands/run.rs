use mailboot_core::{StoreError, log, registrar, settings};
use mailboot_windows::SchtasksStore;

/// Triggers an immediate run of the server task, independent of its
/// logon trigger.
pub fn execute() {
    let settings = settings::load();
    log::init(&settings.log);

    let name = &settings.server.task_name;
    let mut store = SchtasksStore::new();

    match registrar::run_now(&mut store, name) {
        Ok(()) => println!("Run request sent for '{name}'."),
        Err(StoreError::NotFound(_)) => {
            eprintln!("Scheduled task '{name}' is not registered.");
            eprintln!("Run 'mailboot install' first.");
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
