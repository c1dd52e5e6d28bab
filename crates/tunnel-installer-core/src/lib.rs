//! Tunnel Installer - registers the SSH Tunnel Manager with the desktop.
//!
//! Writes an application-menu entry and an identical autostart entry that
//! launch `ssh_tunnel_manager_launcher.py` from the installer's directory.
//! All locations are passed in explicitly, so the library can be driven
//! against any home directory.
//!
//! # Example
//!
//! ```rust,no_run
//! use tunnel_installer::{InstallOptions, InstallPaths, Installer};
//!
//! fn main() -> tunnel_installer::Result<()> {
//!     let paths = InstallPaths::discover("/opt/ssh-tunnel-manager")?;
//!     let installer = Installer::new(paths, InstallOptions::default());
//!
//!     let report = installer.install()?;
//!     println!("Menu entry: {}", report.menu_entry.display());
//!     println!("Autostart entry: {}", report.autostart_entry.display());
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod platform;
pub mod shortcut;
pub mod staging;

mod installer;

// Re-export commonly used types
pub use error::{InstallerError, Result};
pub use installer::{
    CompanionStatus, DependencyPolicy, EntryState, EntryStatus, InstallOptions, InstallPaths,
    InstallReport, InstallStatus, Installer, UninstallReport,
};
pub use shortcut::DesktopEntry;
