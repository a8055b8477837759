use std::process::Command;

#[test]
fn help_exits_successfully() {
    // Arrange
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_mailboot"));
    cmd.arg("--help");

    // Act
    let output = cmd.output().expect("failed to execute mailboot");

    // Assert
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("mail-automation server"));
    assert!(stdout.contains("install"));
    assert!(stdout.contains("uninstall"));
}

#[test]
fn version_exits_successfully() {
    // Arrange
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_mailboot"));
    cmd.arg("--version");

    // Act
    let output = cmd.output().expect("failed to execute mailboot");

    // Assert
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("mailboot"));
}

#[test]
fn install_rejects_conflicting_start_flags() {
    // Arrange
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_mailboot"));
    cmd.args(["install", "--yes", "--no-start"]);

    // Act
    let output = cmd.output().expect("failed to execute mailboot");

    // Assert
    assert!(!output.status.success());
}
