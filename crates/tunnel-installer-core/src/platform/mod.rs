//! Platform abstraction layer.
//!
//! All `#[cfg]` blocks for OS-specific behavior live in this module rather
//! than in the installer logic.
//!
//! - `paths` - home and XDG directory resolution
//! - `permissions` - executable bits

pub mod paths;
pub mod permissions;

pub use paths::{applications_dir, autostart_dir, home_dir, resolve_dir};
pub use permissions::{is_executable, set_executable};

/// Returns true if the current platform understands XDG desktop entries.
pub fn supports_desktop_entries() -> bool {
    cfg!(all(unix, not(target_os = "macos")))
}
