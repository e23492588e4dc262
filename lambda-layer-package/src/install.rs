use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

/// Runs the external package installer that populates the staging tree.
///
/// The wrapper is deliberately narrow: one invocation, installing a single
/// wheel into a target directory. The program name is configurable so tests
/// can substitute a fake installer.
#[derive(Debug, Clone)]
pub struct WheelInstaller {
    program: String,
}

impl Default for WheelInstaller {
    fn default() -> Self {
        WheelInstaller::new("pip")
    }
}

impl WheelInstaller {
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        WheelInstaller {
            program: program.into(),
        }
    }

    /// Installs the given wheel and its declared dependencies into `target_dir`.
    ///
    /// The installer cache is disabled so dependencies are always resolved from
    /// the canonical index, and non-essential installer output is suppressed.
    /// The invocation is synchronous and unbounded; there is no timeout.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the wheel does not exist, the installer executable
    /// cannot be found, the process cannot be spawned, or it exits non-zero.
    pub fn install(&self, wheel_path: &Path, target_dir: &Path) -> Result<(), InstallError> {
        if !wheel_path.is_file() {
            return Err(InstallError::MissingWheel(wheel_path.to_path_buf()));
        }

        let program = which::which(&self.program)
            .map_err(|e| InstallError::InstallerNotFound(self.program.clone(), e))?;

        let output = Command::new(program)
            .arg("install")
            .arg("--no-cache-dir")
            .arg("--quiet")
            .arg(wheel_path)
            .arg("--target")
            .arg(target_dir)
            .output()
            .map_err(InstallError::InstallerProcessIoError)?;

        if output.status.success() {
            Ok(())
        } else {
            Err(InstallError::UnexpectedExitStatus {
                status: output.status,
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            })
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum InstallError {
    #[error("Wheel {0} does not exist")]
    MissingWheel(PathBuf),
    #[error("Could not find installer executable {0}: {1}")]
    InstallerNotFound(String, #[source] which::Error),
    #[error("Error while running installer process: {0}")]
    InstallerProcessIoError(#[source] std::io::Error),
    #[error("Installer unexpectedly exited with status {status}: {stderr}")]
    UnexpectedExitStatus {
        status: ExitStatus,
        stdout: String,
        stderr: String,
    },
}
