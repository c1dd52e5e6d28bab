//! Centralized configuration for the tunnel installer.
//!
//! Fixed names, descriptor values and permission modes live here so the
//! installer logic never hardcodes them.

/// Application-level values shown in the desktop entry.
pub struct AppConfig;

impl AppConfig {
    pub const APP_NAME: &'static str = "SSH Tunnel Manager";
    pub const COMMENT: &'static str = "Manage SSH tunnel connections from the system tray";
    pub const ICON: &'static str = "network-server";
    pub const CATEGORIES: &'static [&'static str] = &["Network", "Utility"];
}

/// Names of the files the installer reads and writes.
pub struct EntryConfig;

impl EntryConfig {
    pub const DESKTOP_FILE_NAME: &'static str = "ssh-tunnel-manager.desktop";
    pub const LAUNCHER_SCRIPT: &'static str = "ssh_tunnel_manager_launcher.py";
    pub const APP_SCRIPT: &'static str = "ssh_tunnel_manager_app.py";

    /// Companion scripts that must sit next to the installer.
    pub const COMPANION_SCRIPTS: [&'static str; 2] = [Self::LAUNCHER_SCRIPT, Self::APP_SCRIPT];
}

/// Per-user directory layout and file modes.
pub struct PathsConfig;

impl PathsConfig {
    /// `~/.local/share/applications`
    pub const APPLICATIONS_SEGMENTS: [&'static str; 3] = [".local", "share", "applications"];
    /// `~/.config/autostart`
    pub const AUTOSTART_SEGMENTS: [&'static str; 2] = [".config", "autostart"];
    pub const EXECUTABLE_MODE: u32 = 0o755;
    pub const STAGING_PREFIX: &'static str = ".ssh-tunnel-manager.";
}
