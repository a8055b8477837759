use mailboot_core::registrar::Teardown;
use mailboot_core::{log, log_info, log_warn, registrar, settings};
use mailboot_windows::SchtasksStore;

/// Removes every task this tool may have registered.
///
/// Both the server and the companion names are attempted regardless of
/// which install profile was used; a name that was never registered is
/// reported, not treated as a failure, so uninstall is re-runnable.
pub fn execute() {
    let settings = settings::load();
    log::init(&settings.log);

    let names = [&settings.companion.task_name, &settings.server.task_name];
    let mut store = SchtasksStore::new();
    let mut failed = false;

    for name in names {
        match registrar::unregister(&mut store, name) {
            Ok(Teardown::Removed) => {
                println!("Removed scheduled task '{name}'.");
                log_info!("removed task '{name}'");
            }
            Ok(Teardown::NotRegistered) => {
                println!("Scheduled task '{name}' was not registered.");
            }
            Err(e) => {
                eprintln!("Error removing '{name}': {e}");
                log_warn!("failed to remove task '{name}': {e}");
                failed = true;
            }
        }
    }

    if failed {
        std::process::exit(1);
    }
}
