//! Opens the platform file browser at the settings file.
//!
//! | Platform | Command                         |
//! |----------|---------------------------------|
//! | Windows  | `explorer.exe /select, <file>`  |
//! | macOS    | `open -R <file>`                |
//! | other    | `xdg-open <directory of file>`  |
//!
//! The browser is spawned and left running; this module never waits for it.
//!
//! # Testability
//!
//! The `ProcessLauncher` trait abstracts the actual spawn so unit tests can
//! check which command would be run without opening any windows.

use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use thiserror::Error;
use tracing::info;

/// Error type for [`reveal_in_file_browser`].
#[derive(Debug, Error)]
pub enum RevealError {
    #[error("failed to launch {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
}

/// A program invocation that reveals a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealCommand {
    pub program: String,
    pub args: Vec<String>,
}

/// Trait abstracting process creation.
#[cfg_attr(test, mockall::automock)]
pub trait ProcessLauncher {
    /// Starts `command` without waiting for it to exit.
    fn launch(&self, command: &RevealCommand) -> io::Result<()>;
}

/// Launches real processes, detached from the terminal's stdio.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemLauncher;

impl ProcessLauncher for SystemLauncher {
    fn launch(&self, command: &RevealCommand) -> io::Result<()> {
        Command::new(&command.program)
            .args(&command.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map(|_child| ())
    }
}

/// Builds the command that reveals `path` on the current platform.
pub fn reveal_command(path: &Path) -> RevealCommand {
    if cfg!(target_os = "windows") {
        let explorer = std::env::var_os("WINDIR")
            .map(|dir| PathBuf::from(dir).join("explorer.exe"))
            .unwrap_or_else(|| PathBuf::from("explorer.exe"));
        // The switch and the path stay separate arguments. A path with a
        // space gets quoted, and explorer ignores a quoted `/select,...`.
        RevealCommand {
            program: explorer.display().to_string(),
            args: vec!["/select,".to_string(), path.display().to_string()],
        }
    } else if cfg!(target_os = "macos") {
        RevealCommand {
            program: "open".to_string(),
            args: vec!["-R".to_string(), path.display().to_string()],
        }
    } else {
        // xdg-open cannot select a file, so open the folder that holds it.
        let folder = path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        RevealCommand {
            program: "xdg-open".to_string(),
            args: vec![folder.display().to_string()],
        }
    }
}

/// Opens the file browser focused on `path` using `launcher`.
///
/// # Errors
///
/// Returns [`RevealError::Spawn`] if the browser process cannot be started.
pub fn reveal_with<L: ProcessLauncher + ?Sized>(
    launcher: &L,
    path: &Path,
) -> Result<(), RevealError> {
    let command = reveal_command(path);
    launcher
        .launch(&command)
        .map_err(|source| RevealError::Spawn {
            program: command.program.clone(),
            source,
        })?;
    info!(program = %command.program, path = %path.display(), "opened file browser");
    Ok(())
}

/// Opens the platform file browser focused on `path`.
///
/// # Errors
///
/// Returns [`RevealError::Spawn`] if the browser process cannot be started.
pub fn reveal_in_file_browser(path: &Path) -> Result<(), RevealError> {
    reveal_with(&SystemLauncher, path)
}
