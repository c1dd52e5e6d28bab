//! Human-readable progress and result messages.

use tunnel_installer::{EntryState, InstallReport, InstallStatus, InstallerError, UninstallReport};

/// Print a hint for errors raised before anything was written, then pass the
/// error through.
pub fn with_precondition_hint(err: InstallerError) -> InstallerError {
    if err.is_precondition() {
        eprintln!("Nothing was changed.");
        eprintln!(
            "Hint: pass --script-dir pointing at the directory that holds ssh_tunnel_manager_launcher.py, or drop --strict to install anyway."
        );
    }
    err
}

pub fn print_install_start() {
    println!("Installing SSH Tunnel Manager...");
}

pub fn print_install_report(report: &InstallReport) {
    for path in &report.made_executable {
        println!("Made executable: {}", path.display());
    }
    for path in &report.missing_dependencies {
        println!("Warning: {} not found, continuing", path.display());
    }
    println!("Created menu entry: {}", report.menu_entry.display());
    println!("Created autostart entry: {}", report.autostart_entry.display());
    println!();
    println!("Installation complete!");
    println!("SSH Tunnel Manager is now in your applications menu and will start at login.");
    println!("Launcher: {}", report.exec);
}

pub fn print_uninstall_report(report: &UninstallReport) {
    for path in &report.removed {
        println!("Removed: {}", path.display());
    }
    if report.removed.is_empty() {
        println!("SSH Tunnel Manager entries were not installed.");
    } else {
        println!("Uninstall complete.");
    }
}

pub fn print_status(status: &InstallStatus) {
    for (label, entry) in [
        ("Menu entry", &status.menu_entry),
        ("Autostart entry", &status.autostart_entry),
    ] {
        println!("{}: {} ({})", label, state_label(entry.state), entry.path.display());
    }
    for companion in &status.companions {
        let state = match (companion.present, companion.executable) {
            (false, _) => "missing",
            (true, false) => "not executable",
            (true, true) => "ok",
        };
        println!("Script: {} ({})", state, companion.path.display());
    }
    println!("Launcher: {}", status.exec);
}

fn state_label(state: EntryState) -> &'static str {
    match state {
        EntryState::Missing => "missing",
        EntryState::Current => "installed",
        EntryState::Stale => "outdated",
    }
}
