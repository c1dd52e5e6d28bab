//! Staged file writes.
//!
//! A staged write goes through:
//! 1. Temp file created next to the target (same filesystem)
//! 2. fsync to ensure data reaches disk
//! 3. Permissions applied on the temp file
//! 4. Atomic rename onto the target on commit
//!
//! Dropping a [`StagedFile`] without committing removes the temp file, so an
//! aborted install leaves no debris behind.

use crate::config::PathsConfig;
use crate::error::{InstallerError, Result};
use std::fs::{self, Permissions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

/// Content written to a temp file, waiting to be renamed onto its target.
#[derive(Debug)]
pub struct StagedFile {
    temp: NamedTempFile,
    target: PathBuf,
}

impl StagedFile {
    /// Write `content` to a temp file in the target's directory.
    ///
    /// The parent directory must already exist.
    pub fn stage(target: &Path, content: &[u8], executable: bool) -> Result<Self> {
        let parent = target.parent().ok_or_else(|| InstallerError::Io {
            message: "target has no parent directory".to_string(),
            path: Some(target.to_path_buf()),
            source: None,
        })?;

        let mut temp = tempfile::Builder::new()
            .prefix(PathsConfig::STAGING_PREFIX)
            .suffix(".tmp")
            .tempfile_in(parent)
            .map_err(|e| InstallerError::io_action("create staging file", parent, e))?;

        temp.write_all(content)
            .map_err(|e| InstallerError::io_action("write staging file", temp.path(), e))?;
        temp.as_file()
            .sync_all()
            .map_err(|e| InstallerError::io_action("sync staging file", temp.path(), e))?;

        if executable {
            temp.as_file()
                .set_permissions(executable_permissions(temp.path())?)
                .map_err(|e| InstallerError::io_action("set permissions", temp.path(), e))?;
        }

        debug!("Staged {} bytes for {}", content.len(), target.display());

        Ok(Self {
            temp,
            target: target.to_path_buf(),
        })
    }

    /// Atomically rename the staged content onto the target.
    pub fn commit(self) -> Result<PathBuf> {
        let target = self.target;
        self.temp
            .persist(&target)
            .map_err(|e| InstallerError::io_action("commit staged file", &target, e.error))?;
        debug!("Committed {}", target.display());
        Ok(target)
    }
}

/// What a file looked like before the installer replaced it.
#[derive(Debug)]
pub enum PriorState {
    Absent,
    Present {
        content: Vec<u8>,
        permissions: Permissions,
    },
}

impl PriorState {
    /// Capture the current state of `path`.
    pub fn capture(path: &Path) -> Result<Self> {
        match fs::read(path) {
            Ok(content) => {
                let permissions = fs::metadata(path)
                    .map_err(|e| InstallerError::io_with_path(e, path))?
                    .permissions();
                Ok(PriorState::Present {
                    content,
                    permissions,
                })
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(PriorState::Absent),
            Err(e) => Err(InstallerError::io_action("read existing entry", path, e)),
        }
    }

    /// Put `path` back the way it was captured.
    pub fn restore(self, path: &Path) -> std::io::Result<()> {
        match self {
            PriorState::Absent => match fs::remove_file(path) {
                Err(e) if e.kind() != ErrorKind::NotFound => Err(e),
                _ => Ok(()),
            },
            PriorState::Present {
                content,
                permissions,
            } => {
                let staged = StagedFile::stage(path, &content, false).map_err(into_io)?;
                staged.temp.as_file().set_permissions(permissions)?;
                staged.commit().map_err(into_io)?;
                warn!("Restored previous contents of {}", path.display());
                Ok(())
            }
        }
    }
}

#[cfg(unix)]
fn executable_permissions(_path: &Path) -> Result<Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Ok(Permissions::from_mode(PathsConfig::EXECUTABLE_MODE))
}

#[cfg(not(unix))]
fn executable_permissions(path: &Path) -> Result<Permissions> {
    Ok(fs::metadata(path)
        .map_err(|e| InstallerError::io_with_path(e, path))?
        .permissions())
}

fn into_io(err: InstallerError) -> std::io::Error {
    match err {
        InstallerError::Io {
            source: Some(source),
            ..
        } => source,
        other => std::io::Error::other(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::is_executable;
    use tempfile::TempDir;

    #[test]
    fn test_stage_and_commit() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("entry.desktop");

        let staged = StagedFile::stage(&target, b"[Desktop Entry]\n", true).unwrap();
        assert!(!target.exists());

        staged.commit().unwrap();
        assert_eq!(fs::read(&target).unwrap(), b"[Desktop Entry]\n");
        assert!(is_executable(&target));
    }

    #[test]
    fn test_dropped_stage_leaves_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("entry.desktop");

        {
            let _staged = StagedFile::stage(&target, b"abandoned", false).unwrap();
        }

        assert!(!target.exists());
        assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_stage_missing_parent() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("missing").join("entry.desktop");

        let err = StagedFile::stage(&target, b"x", false).unwrap_err();
        assert!(matches!(err, InstallerError::Io { .. }));
    }

    #[test]
    fn test_restore_absent_removes_file() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("entry.desktop");

        let prior = PriorState::capture(&target).unwrap();
        assert!(matches!(prior, PriorState::Absent));

        fs::write(&target, "new").unwrap();
        prior.restore(&target).unwrap();
        assert!(!target.exists());
    }

    #[test]
    fn test_restore_present_brings_back_content() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("entry.desktop");
        fs::write(&target, "old").unwrap();

        let prior = PriorState::capture(&target).unwrap();
        fs::write(&target, "new").unwrap();

        prior.restore(&target).unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "old");
    }
}
