//! Desktop menu and autostart entry descriptors.
//!
//! The same rendered `.desktop` file serves as the application-menu entry in
//! `~/.local/share/applications` and as the login entry in
//! `~/.config/autostart`.
//!
//! # Example
//!
//! ```rust
//! use std::path::Path;
//! use tunnel_installer::shortcut::DesktopEntry;
//!
//! let entry = DesktopEntry::ssh_tunnel_manager(Path::new("/opt/tunnel"));
//! assert!(entry
//!     .render()
//!     .contains("Exec=/opt/tunnel/ssh_tunnel_manager_launcher.py"));
//! ```

mod desktop_entry;

pub use desktop_entry::{exec_path, DesktopEntry, DesktopEntryBuilder};
