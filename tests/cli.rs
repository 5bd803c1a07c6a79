//! Integration tests: run the binary for the paths that never open the screen.

use std::fs;
use std::path::PathBuf;
use std::process::Command;

/// Config file in a per-test temp directory that logs next to itself.
fn temp_config(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("xask-cli-{}-{name}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let config = dir.join("config.toml");
    let log = dir.join("xask.log");
    fs::write(
        &config,
        format!("log_file_path = {:?}\n", log.display().to_string()),
    )
    .unwrap();
    config
}

fn xask() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_xask"));
    command.env_remove("XASK_ENGINE").env_remove("XASK_CONFIG");
    command
}

#[test]
fn binary_prints_version() {
    let output = xask().arg("--version").output().expect("Failed to execute binary");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("0.1.0"),
        "Expected output to contain version '0.1.0', but got: {}",
        stdout
    );
}

#[test]
fn unknown_engine_fails_before_taking_the_terminal() {
    let config = temp_config("engine");

    let output = xask()
        .args(["--config", config.to_str().unwrap(), "-e", "bogus", "Hello?"])
        .output()
        .expect("Failed to execute binary");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("bogus"), "stderr was: {stderr}");
}

#[test]
fn invalid_color_in_config_is_reported() {
    let config = temp_config("color");
    let mut contents = fs::read_to_string(&config).unwrap();
    contents.push_str("engine = \"dummy\"\ncursor_color = \"not-a-color\"\n");
    fs::write(&config, contents).unwrap();

    let output = xask()
        .args(["--config", config.to_str().unwrap(), "Hello?"])
        .output()
        .expect("Failed to execute binary");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("not-a-color"), "stderr was: {stderr}");
}

#[test]
fn malformed_config_is_reported() {
    let config = temp_config("malformed");
    fs::write(&config, "fps = \"fast\"\n").unwrap();

    let output = xask()
        .args(["--config", config.to_str().unwrap(), "Hello?"])
        .output()
        .expect("Failed to execute binary");

    assert!(!output.status.success());
}
