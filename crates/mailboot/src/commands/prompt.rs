use std::io::{BufRead, Write};

/// Asks a yes/no question on the console; `Y`/`y` means yes, anything
/// else (including just Enter) means no.
pub fn confirm(question: &str) -> bool {
    print!("{question} [Y/N] ");
    let _ = std::io::stdout().flush();

    let mut answer = String::new();
    if std::io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim(), "y" | "Y" | "yes" | "Yes" | "YES")
}

/// Holds the console open so the diagnosis stays readable when the
/// tool was launched by double-click rather than from a shell.
pub fn pause() {
    print!("Press Enter to exit...");
    let _ = std::io::stdout().flush();
    let mut sink = String::new();
    let _ = std::io::stdin().lock().read_line(&mut sink);
}
