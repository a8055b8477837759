use mailboot_core::{TaskStore, settings};
use mailboot_windows::SchtasksStore;

/// Shows the registration state of each configured task name.
pub fn execute() {
    let settings = settings::load();
    let store = SchtasksStore::new();
    let names = [&settings.server.task_name, &settings.companion.task_name];

    for name in names {
        match store.get(name) {
            Ok(Some(task)) => {
                println!("{name}: registered");
                println!("  command   {}", task.command_line());
                println!("  directory {}", task.working_directory.display());
                let delay = task.trigger.delay();
                if delay.is_zero() {
                    println!("  trigger   at logon");
                } else {
                    println!("  trigger   at logon, delayed {}s", delay.as_secs());
                }
                if task.restart_policy.max_attempts > 0 {
                    println!(
                        "  restart   up to {} times, every {}s",
                        task.restart_policy.max_attempts,
                        task.restart_policy.interval.as_secs()
                    );
                }
            }
            Ok(None) => println!("{name}: not registered"),
            Err(e) => {
                eprintln!("{name}: cannot query the task store: {e}");
            }
        }
    }
}
