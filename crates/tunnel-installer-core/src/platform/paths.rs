//! Per-user directory resolution.
//!
//! The entry locations are fixed relative to the home directory rather than
//! following `XDG_DATA_HOME`/`XDG_CONFIG_HOME`, so an install always lands in
//! `~/.local/share/applications` and `~/.config/autostart`.

use crate::config::PathsConfig;
use crate::error::{InstallerError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Get the current user's home directory.
///
/// On Linux this honors `$HOME`.
pub fn home_dir() -> Result<PathBuf> {
    dirs::home_dir().ok_or(InstallerError::HomeDirUnavailable)
}

/// Applications-menu directory under `home`.
pub fn applications_dir(home: &Path) -> PathBuf {
    PathsConfig::APPLICATIONS_SEGMENTS
        .iter()
        .fold(home.to_path_buf(), |dir, segment| dir.join(segment))
}

/// Autostart directory under `home`.
pub fn autostart_dir(home: &Path) -> PathBuf {
    PathsConfig::AUTOSTART_SEGMENTS
        .iter()
        .fold(home.to_path_buf(), |dir, segment| dir.join(segment))
}

/// Resolve `dir` to an absolute, symlink-free directory path.
///
/// Relative inputs are resolved against the current working directory.
pub fn resolve_dir(dir: &Path) -> Result<PathBuf> {
    let resolved = fs::canonicalize(dir).map_err(|e| InstallerError::InvalidScriptDir {
        path: dir.to_path_buf(),
        reason: e.to_string(),
    })?;

    if !resolved.is_dir() {
        return Err(InstallerError::InvalidScriptDir {
            path: dir.to_path_buf(),
            reason: "not a directory".to_string(),
        });
    }

    Ok(resolved)
}
