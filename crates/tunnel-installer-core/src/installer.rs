//! Menu and autostart entry installation.
//!
//! The installer never reads ambient state itself: the script directory and
//! the target directories arrive through [`InstallPaths`], which keeps every
//! operation testable against a throwaway home directory.

use crate::config::EntryConfig;
use crate::error::{InstallerError, Result};
use crate::platform;
use crate::shortcut::DesktopEntry;
use crate::staging::{PriorState, StagedFile};
use serde::Serialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// What to do when a companion script is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DependencyPolicy {
    /// Log, record in the report and keep going.
    #[default]
    Warn,
    /// Fail with [`InstallerError::MissingDependency`] before writing anything.
    Abort,
}

/// Runtime options for an install.
#[derive(Debug, Clone, Default)]
pub struct InstallOptions {
    pub dependency_policy: DependencyPolicy,
}

/// Locations the installer works with.
#[derive(Debug, Clone)]
pub struct InstallPaths {
    /// Directory holding the companion scripts.
    pub script_dir: PathBuf,
    /// Applications-menu directory (`~/.local/share/applications`).
    pub applications_dir: PathBuf,
    /// Autostart directory (`~/.config/autostart`).
    pub autostart_dir: PathBuf,
}

impl InstallPaths {
    /// Build the standard layout under an explicit home directory.
    pub fn from_home(script_dir: impl Into<PathBuf>, home: &Path) -> Self {
        Self {
            script_dir: script_dir.into(),
            applications_dir: platform::applications_dir(home),
            autostart_dir: platform::autostart_dir(home),
        }
    }

    /// Build the standard layout under the current user's home directory.
    pub fn discover(script_dir: impl Into<PathBuf>) -> Result<Self> {
        let home = platform::home_dir()?;
        Ok(Self::from_home(script_dir, &home))
    }

    pub fn menu_entry_path(&self) -> PathBuf {
        self.applications_dir.join(EntryConfig::DESKTOP_FILE_NAME)
    }

    pub fn autostart_entry_path(&self) -> PathBuf {
        self.autostart_dir.join(EntryConfig::DESKTOP_FILE_NAME)
    }

    pub fn launcher_path(&self) -> PathBuf {
        self.script_dir.join(EntryConfig::LAUNCHER_SCRIPT)
    }

    pub fn app_path(&self) -> PathBuf {
        self.script_dir.join(EntryConfig::APP_SCRIPT)
    }

    fn companion_paths(&self) -> impl Iterator<Item = PathBuf> + '_ {
        EntryConfig::COMPANION_SCRIPTS
            .iter()
            .map(move |name| self.script_dir.join(name))
    }
}

/// Result of an install.
#[derive(Debug, Clone)]
pub struct InstallReport {
    /// Written applications-menu entry.
    pub menu_entry: PathBuf,
    /// Written autostart entry.
    pub autostart_entry: PathBuf,
    /// Value of the `Exec` key.
    pub exec: String,
    /// Companion scripts whose executable bit was set.
    pub made_executable: Vec<PathBuf>,
    /// Companion scripts that were not found.
    pub missing_dependencies: Vec<PathBuf>,
}

/// Result of an uninstall.
#[derive(Debug, Clone, Default)]
pub struct UninstallReport {
    pub removed: Vec<PathBuf>,
    pub not_present: Vec<PathBuf>,
}

/// State of one installed descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryState {
    Missing,
    /// Matches a fresh render and is executable.
    Current,
    /// Present but outdated or missing its executable bit.
    Stale,
}

#[derive(Debug, Clone, Serialize)]
pub struct EntryStatus {
    pub path: PathBuf,
    pub state: EntryState,
}

#[derive(Debug, Clone, Serialize)]
pub struct CompanionStatus {
    pub path: PathBuf,
    pub present: bool,
    pub executable: bool,
}

/// Read-only view of what is on disk.
#[derive(Debug, Clone, Serialize)]
pub struct InstallStatus {
    pub menu_entry: EntryStatus,
    pub autostart_entry: EntryStatus,
    pub exec: String,
    pub companions: Vec<CompanionStatus>,
}

impl InstallStatus {
    /// Both entries exist with current content.
    pub fn is_installed(&self) -> bool {
        self.menu_entry.state == EntryState::Current
            && self.autostart_entry.state == EntryState::Current
    }
}

/// Installs, removes and inspects the SSH Tunnel Manager desktop entries.
pub struct Installer {
    paths: InstallPaths,
    options: InstallOptions,
}

impl Installer {
    pub fn new(paths: InstallPaths, options: InstallOptions) -> Self {
        Self { paths, options }
    }

    /// Install the menu entry and its autostart copy.
    ///
    /// Both descriptors are staged before either is committed. If committing
    /// the autostart entry fails, the menu entry is put back the way it was.
    pub fn install(&self) -> Result<InstallReport> {
        let script_dir = platform::resolve_dir(&self.paths.script_dir)?;
        let resolved = InstallPaths {
            script_dir: script_dir.clone(),
            ..self.paths.clone()
        };
        info!("Installing desktop entries for {}", script_dir.display());

        let (present, missing): (Vec<PathBuf>, Vec<PathBuf>) =
            resolved.companion_paths().partition(|path| path.is_file());

        if let Some(path) = missing.first() {
            match self.options.dependency_policy {
                DependencyPolicy::Abort => {
                    return Err(InstallerError::MissingDependency { path: path.clone() });
                }
                DependencyPolicy::Warn => {
                    for path in &missing {
                        warn!("Companion script not found: {}", path.display());
                    }
                }
            }
        }

        let mut made_executable = Vec::with_capacity(present.len());
        for path in present {
            platform::set_executable(&path)?;
            made_executable.push(path);
        }

        for dir in [&resolved.applications_dir, &resolved.autostart_dir] {
            fs::create_dir_all(dir)
                .map_err(|e| InstallerError::io_action("create directory", dir, e))?;
        }

        let entry = DesktopEntry::ssh_tunnel_manager(&script_dir);
        let content = entry.render();
        debug!("Rendered desktop entry:\n{}", content);

        let menu_path = resolved.menu_entry_path();
        let autostart_path = resolved.autostart_entry_path();

        let menu_staged = StagedFile::stage(&menu_path, content.as_bytes(), true)?;
        let autostart_staged = StagedFile::stage(&autostart_path, content.as_bytes(), true)?;

        let menu_prior = PriorState::capture(&menu_path)?;
        menu_staged.commit()?;
        info!("Wrote menu entry {}", menu_path.display());

        if let Err(err) = autostart_staged.commit() {
            warn!("Autostart entry failed, rolling back menu entry: {}", err);
            menu_prior
                .restore(&menu_path)
                .map_err(|source| InstallerError::RollbackFailed {
                    path: menu_path.clone(),
                    source,
                })?;
            return Err(err);
        }
        info!("Wrote autostart entry {}", autostart_path.display());

        Ok(InstallReport {
            menu_entry: menu_path,
            autostart_entry: autostart_path,
            exec: entry.exec,
            made_executable,
            missing_dependencies: missing,
        })
    }

    /// Remove both descriptors. Files that are already gone are not an error.
    pub fn uninstall(&self) -> Result<UninstallReport> {
        let mut report = UninstallReport::default();

        for path in [self.paths.menu_entry_path(), self.paths.autostart_entry_path()] {
            match fs::remove_file(&path) {
                Ok(()) => {
                    info!("Removed {}", path.display());
                    report.removed.push(path);
                }
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    debug!("Nothing to remove at {}", path.display());
                    report.not_present.push(path);
                }
                Err(e) => return Err(InstallerError::io_action("remove entry", path, e)),
            }
        }

        Ok(report)
    }

    /// Inspect both descriptors and the companion scripts without writing.
    pub fn status(&self) -> Result<InstallStatus> {
        let script_dir = platform::resolve_dir(&self.paths.script_dir)?;
        let entry = DesktopEntry::ssh_tunnel_manager(&script_dir);
        let expected = entry.render();

        let companions = EntryConfig::COMPANION_SCRIPTS
            .iter()
            .map(|name| {
                let path = script_dir.join(name);
                CompanionStatus {
                    present: path.is_file(),
                    executable: platform::is_executable(&path),
                    path,
                }
            })
            .collect();

        Ok(InstallStatus {
            menu_entry: entry_status(self.paths.menu_entry_path(), &expected)?,
            autostart_entry: entry_status(self.paths.autostart_entry_path(), &expected)?,
            exec: entry.exec,
            companions,
        })
    }
}

fn entry_status(path: PathBuf, expected: &str) -> Result<EntryStatus> {
    let state = match fs::read(&path) {
        Ok(actual) if actual == expected.as_bytes() && platform::is_executable(&path) => {
            EntryState::Current
        }
        Ok(_) => EntryState::Stale,
        Err(e) if e.kind() == ErrorKind::NotFound => EntryState::Missing,
        Err(e) => return Err(InstallerError::io_action("read entry", path, e)),
    };

    Ok(EntryStatus { path, state })
}
