use mailboot_core::settings;

/// Creates the default settings file at `~/.config/mailboot/`.
///
/// Generates `mailboot.toml` with comments explaining every option.
/// An existing file is not overwritten.
pub fn execute() {
    let Some(dir) = settings::config_dir() else {
        eprintln!("Error: could not determine home directory.");
        std::process::exit(1);
    };

    if let Err(e) = std::fs::create_dir_all(&dir) {
        eprintln!("Error: could not create {}: {e}", dir.display());
        std::process::exit(1);
    }

    let path = dir.join("mailboot.toml");
    if path.exists() {
        println!("Already exists: {}", path.display());
        return;
    }

    match std::fs::write(&path, settings::generate_template()) {
        Ok(()) => {
            println!("Created {}", path.display());
            println!();
            println!("Edit this file to change task names, the interpreter, the server");
            println!("script path, and restart limits, then run 'mailboot install'.");
        }
        Err(e) => {
            eprintln!("Error: could not write {}: {e}", path.display());
            std::process::exit(1);
        }
    }
}
