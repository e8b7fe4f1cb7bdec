//! Read-only Docker environment diagnostics.
//!
//! The `doctor` command reports whether the `docker` CLI is installed,
//! whether the daemon is reachable, and whether the host is running under
//! WSL2. These are status checks only; nothing on the host is modified and
//! no container is ever started.

use std::{fs, process::Command};

/// Diagnosis of the local Docker environment.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct DockerStatus {
    /// Whether `docker --version` succeeds
    pub installed: bool,

    /// Whether `docker info` succeeds (daemon reachable)
    pub running: bool,

    /// Whether the host looks like WSL2
    pub wsl2: bool,
}

impl DockerStatus {
    /// Whether Docker is fully available for deployment.
    #[must_use]
    pub const fn available(&self) -> bool {
        self.installed && self.running
    }
}

/// Probe the local Docker environment.
///
/// A missing `docker` binary or a failing invocation is reported as
/// `installed: false` rather than an error; the daemon check is skipped
/// entirely when the CLI is absent.
#[must_use]
pub fn diagnose() -> DockerStatus {
    let installed = command_succeeds("docker", &["--version"]);
    let running = installed && command_succeeds("docker", &["info"]);

    DockerStatus {
        installed,
        running,
        wsl2: is_wsl2(),
    }
}

/// Run a command with captured output and report whether it exited zero.
fn command_succeeds(program: &str, args: &[&str]) -> bool {
    Command::new(program)
        .args(args)
        .output()
        .is_ok_and(|out| out.status.success())
}

/// Whether the host is running under Windows Subsystem for Linux 2.
///
/// Mirrors the `grep -q WSL2 /proc/version` check: on non-Linux hosts the
/// file does not exist and this returns `false`.
#[must_use]
pub fn is_wsl2() -> bool {
    fs::read_to_string("/proc/version").is_ok_and(|version| version.contains("WSL2"))
}
