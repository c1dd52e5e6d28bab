//! File permission handling.

use crate::error::{InstallerError, Result};
use std::path::Path;
use tracing::debug;

/// Make a file executable.
///
/// # Platform Behavior
/// - **Unix**: Sets mode 0o755
/// - **Other**: No-op
///
/// # Errors
/// Returns an error if the file doesn't exist or permissions can't be changed.
pub fn set_executable(path: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let metadata =
            std::fs::metadata(path).map_err(|e| InstallerError::io_with_path(e, path))?;
        let mut permissions = metadata.permissions();
        permissions.set_mode(crate::config::PathsConfig::EXECUTABLE_MODE);
        std::fs::set_permissions(path, permissions)
            .map_err(|e| InstallerError::io_action("set permissions", path, e))?;
        debug!("Set executable permissions on: {}", path.display());
    }

    #[cfg(not(unix))]
    {
        if !path.exists() {
            return Err(InstallerError::Io {
                message: "file not found".to_string(),
                path: Some(path.to_path_buf()),
                source: None,
            });
        }
        debug!("Skipping executable bit on this platform for: {}", path.display());
    }

    Ok(())
}

/// Check if a file has any execute bit set.
pub fn is_executable(path: &Path) -> bool {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::metadata(path)
            .map(|metadata| metadata.permissions().mode() & 0o111 != 0)
            .unwrap_or(false)
    }

    #[cfg(not(unix))]
    {
        path.is_file()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::TempDir;

    #[test]
    fn test_set_executable() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("ssh_tunnel_manager_launcher.py");
        File::create(&file_path).unwrap();

        set_executable(&file_path).unwrap();

        assert!(is_executable(&file_path));
    }

    #[test]
    fn test_set_executable_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("absent.py");

        let err = set_executable(&file_path).unwrap_err();
        assert!(matches!(err, InstallerError::Io { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_is_executable_unix() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("test_file");
        File::create(&file_path).unwrap();

        let mut perms = std::fs::metadata(&file_path).unwrap().permissions();
        perms.set_mode(0o644);
        std::fs::set_permissions(&file_path, perms).unwrap();
        assert!(!is_executable(&file_path));

        set_executable(&file_path).unwrap();
        let mode = std::fs::metadata(&file_path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
    }
}
