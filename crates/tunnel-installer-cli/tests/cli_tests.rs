//! Integration tests for the installer binary.
//!
//! Each test points `HOME` at a temp directory so nothing touches the real
//! user configuration.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

const BIN: &str = env!("CARGO_BIN_EXE_install-ssh-tunnel-manager");

fn run(home: &Path, cwd: &Path, args: &[&str]) -> Output {
    Command::new(BIN)
        .args(args)
        .env("HOME", home)
        .env_remove("RUST_LOG")
        .current_dir(cwd)
        .output()
        .expect("Failed to run installer")
}

fn create_script_dir(root: &Path) -> PathBuf {
    let script_dir = root.join("x");
    fs::create_dir_all(&script_dir).unwrap();
    for name in ["ssh_tunnel_manager_launcher.py", "ssh_tunnel_manager_app.py"] {
        fs::write(script_dir.join(name), "#!/usr/bin/env python3\n").unwrap();
    }
    script_dir
}

fn menu_entry(home: &Path) -> PathBuf {
    home.join(".local/share/applications/ssh-tunnel-manager.desktop")
}

fn autostart_entry(home: &Path) -> PathBuf {
    home.join(".config/autostart/ssh-tunnel-manager.desktop")
}

fn exec_line(path: &Path) -> String {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .find(|line| line.starts_with("Exec="))
        .map(str::to_string)
        .expect("Exec line missing")
}

#[test]
fn test_install_with_script_dir() {
    let temp = TempDir::new().unwrap();
    let home = temp.path().join("home");
    let script_dir = create_script_dir(temp.path());

    let output = run(
        &home,
        temp.path(),
        &["--script-dir", script_dir.to_str().unwrap()],
    );
    assert!(output.status.success(), "{:?}", output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Installation complete!"));

    let expected = fs::canonicalize(&script_dir)
        .unwrap()
        .join("ssh_tunnel_manager_launcher.py");
    assert_eq!(
        exec_line(&menu_entry(&home)),
        format!("Exec={}", expected.display())
    );
    assert_eq!(
        fs::read(menu_entry(&home)).unwrap(),
        fs::read(autostart_entry(&home)).unwrap()
    );
}

#[test]
fn test_exec_independent_of_working_directory() {
    let temp = TempDir::new().unwrap();
    let script_dir = create_script_dir(temp.path());
    let cwds = ["a", "b/c", "d/e/f"].map(|dir| {
        let path = temp.path().join(dir);
        fs::create_dir_all(&path).unwrap();
        path
    });

    let mut lines = Vec::new();
    for (i, cwd) in cwds.iter().enumerate() {
        let home = temp.path().join(format!("home{}", i));
        let output = run(&home, cwd, &["--script-dir", script_dir.to_str().unwrap()]);
        assert!(output.status.success(), "{:?}", output);
        lines.push(exec_line(&menu_entry(&home)));
    }

    assert!(lines.windows(2).all(|pair| pair[0] == pair[1]));
}

#[test]
fn test_default_script_dir_is_binary_dir() {
    let temp = TempDir::new().unwrap();
    let home = temp.path().join("home");

    // The build directory has no companion scripts; the default policy warns.
    let output = run(&home, temp.path(), &[]);
    assert!(output.status.success(), "{:?}", output);

    let bin_dir = fs::canonicalize(BIN).unwrap().parent().unwrap().to_path_buf();
    assert_eq!(
        exec_line(&autostart_entry(&home)),
        format!(
            "Exec={}",
            bin_dir.join("ssh_tunnel_manager_launcher.py").display()
        )
    );
    assert!(String::from_utf8_lossy(&output.stdout).contains("not found, continuing"));
}

#[test]
fn test_strict_fails_without_scripts() {
    let temp = TempDir::new().unwrap();
    let home = temp.path().join("home");
    let empty = temp.path().join("empty");
    fs::create_dir_all(&empty).unwrap();

    let output = run(
        &home,
        temp.path(),
        &["--strict", "--script-dir", empty.to_str().unwrap()],
    );

    assert!(!output.status.success());
    assert!(!String::from_utf8_lossy(&output.stdout).contains("Installation complete!"));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Required file is missing"));
    assert!(stderr.contains("Nothing was changed."));
    assert!(stderr.contains("Hint: pass --script-dir"));
    assert!(!menu_entry(&home).exists());
}

#[test]
fn test_missing_script_dir_prints_hint() {
    let temp = TempDir::new().unwrap();
    let home = temp.path().join("home");
    let nowhere = temp.path().join("nowhere");

    let output = run(&home, temp.path(), &["--script-dir", nowhere.to_str().unwrap()]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Hint: pass --script-dir"), "{}", stderr);
    assert!(!menu_entry(&home).exists());
}

#[test]
fn test_status_and_uninstall() {
    let temp = TempDir::new().unwrap();
    let home = temp.path().join("home");
    let script_dir = create_script_dir(temp.path());
    let dir_arg = script_dir.to_str().unwrap();

    let output = run(&home, temp.path(), &["status", "--script-dir", dir_arg]);
    assert_eq!(output.status.code(), Some(1));

    assert!(run(&home, temp.path(), &["install", "--script-dir", dir_arg])
        .status
        .success());

    let output = run(&home, temp.path(), &["status", "--json", "--script-dir", dir_arg]);
    assert!(output.status.success(), "{:?}", output);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("\"state\": \"current\""));

    let output = run(&home, temp.path(), &["uninstall", "--script-dir", dir_arg]);
    assert!(output.status.success(), "{:?}", output);
    assert!(!menu_entry(&home).exists());
    assert!(!autostart_entry(&home).exists());
}
