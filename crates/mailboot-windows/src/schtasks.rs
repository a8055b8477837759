//! Wrappers around `schtasks.exe` for query, stop, run, and delete.
//!
//! Each call is a blocking out-of-process invocation; the exit code
//! signals success, and failures are classified from the message text
//! because `schtasks` uses the same nonzero exit code for "no such
//! task" and "access denied".

use std::process::Command;

use mailboot_core::StoreError;

/// Exports the task definition as XML: `schtasks /Query /TN <name> /XML`.
pub fn query_xml(name: &str) -> Result<String, StoreError> {
    invoke(name, &["/Query", "/TN", name, "/XML"])
}

/// Deletes the task entry: `schtasks /Delete /TN <name> /F`.
pub fn delete(name: &str) -> Result<(), StoreError> {
    invoke(name, &["/Delete", "/TN", name, "/F"]).map(|_| ())
}

/// Stops a running task instance: `schtasks /End /TN <name>`.
pub fn end(name: &str) -> Result<(), StoreError> {
    invoke(name, &["/End", "/TN", name]).map(|_| ())
}

/// Triggers an immediate run: `schtasks /Run /TN <name>`.
pub fn run(name: &str) -> Result<(), StoreError> {
    invoke(name, &["/Run", "/TN", name]).map(|_| ())
}

/// Runs `schtasks` with `args`, waiting for exit.
///
/// Returns captured stdout on success; failures carry whichever of
/// stderr/stdout holds the diagnostic (schtasks is inconsistent about
/// which stream it uses).
fn invoke(name: &str, args: &[&str]) -> Result<String, StoreError> {
    let output = Command::new("schtasks")
        .args(args)
        .output()
        .map_err(|e| StoreError::Platform(format!("cannot invoke schtasks: {e}")))?;

    if output.status.success() {
        return Ok(String::from_utf8_lossy(&output.stdout).into_owned());
    }

    let mut detail = String::from_utf8_lossy(&output.stderr).trim().to_string();
    if detail.is_empty() {
        detail = String::from_utf8_lossy(&output.stdout).trim().to_string();
    }
    Err(classify(name, &detail))
}

/// Maps a schtasks diagnostic onto the store error taxonomy.
pub(crate) fn classify(name: &str, detail: &str) -> StoreError {
    let lower = detail.to_ascii_lowercase();
    if lower.contains("cannot find the file") || lower.contains("does not exist") {
        StoreError::NotFound(name.to_string())
    } else if lower.contains("access is denied") || lower.contains("access denied") {
        StoreError::PermissionDenied(detail.to_string())
    } else {
        StoreError::Platform(detail.to_string())
    }
}
