//! SSH Tunnel Manager installer.
//!
//! Registers the application-menu and autostart entries for the scripts that
//! sit next to this binary. Run with no arguments to install.

mod output;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;
use tunnel_installer::{platform, DependencyPolicy, InstallOptions, InstallPaths, Installer};

#[derive(Parser, Debug)]
#[command(name = "install-ssh-tunnel-manager")]
#[command(about = "Install desktop menu and autostart entries for SSH Tunnel Manager")]
struct Args {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    /// Directory holding the tunnel manager scripts (defaults to this binary's directory)
    #[arg(long, global = true)]
    script_dir: Option<PathBuf>,

    /// Abort if a companion script is missing instead of warning
    #[arg(long, global = true)]
    strict: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Install the menu and autostart entries (default)
    Install,
    /// Remove the menu and autostart entries
    Uninstall,
    /// Report whether the entries are installed and current
    Status {
        /// Print the status as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    // Logs go to stderr; stdout carries the user-facing messages.
    let default_level = if args.debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    if !platform::supports_desktop_entries() {
        warn!("This platform does not read XDG desktop entries; files will be written but ignored");
    }

    let script_dir = match args.script_dir {
        Some(dir) => dir,
        None => installer_dir()?,
    };
    debug!("Script directory: {}", script_dir.display());

    let paths = InstallPaths::discover(&script_dir).context("Failed to locate user directories")?;
    let options = InstallOptions {
        dependency_policy: if args.strict {
            DependencyPolicy::Abort
        } else {
            DependencyPolicy::Warn
        },
    };
    let installer = Installer::new(paths, options);

    match args.command.unwrap_or(Command::Install) {
        Command::Install => {
            output::print_install_start();
            let report = installer
                .install()
                .map_err(output::with_precondition_hint)
                .context("Installation failed")?;
            output::print_install_report(&report);
            Ok(ExitCode::SUCCESS)
        }
        Command::Uninstall => {
            let report = installer.uninstall().context("Uninstall failed")?;
            output::print_uninstall_report(&report);
            Ok(ExitCode::SUCCESS)
        }
        Command::Status { json } => {
            let status = installer
                .status()
                .map_err(output::with_precondition_hint)
                .context("Failed to read install status")?;
            if json {
                println!("{}", serde_json::to_string_pretty(&status)?);
            } else {
                output::print_status(&status);
            }
            Ok(if status.is_installed() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
    }
}

/// Symlink-resolved directory containing this executable.
fn installer_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe().context("Failed to locate installer executable")?;
    let exe = exe
        .canonicalize()
        .with_context(|| format!("Failed to resolve {}", exe.display()))?;
    exe.parent()
        .map(|dir| dir.to_path_buf())
        .with_context(|| format!("{} has no parent directory", exe.display()))
}
