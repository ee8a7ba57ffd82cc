// Copyright (c) 2026 devip Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! Resolution and invocation of the system `ip` binary.
//!
//! The binary location is probed once per process and cached; report
//! generation receives the resolved command explicitly instead of
//! re-checking the filesystem on every call.

use std::path::Path;
use std::process::{Command, ExitStatus};
use std::sync::OnceLock;

use thiserror::Error;
use tracing::debug;

const PRIMARY_PATH: &str = "/sbin/ip";
const FALLBACK_PATH: &str = "/usr/sbin/ip";

static IP_COMMAND: OnceLock<IpCommand> = OnceLock::new();

/// Failure modes of an external command invocation.
///
/// There is deliberately no retry or salvage here: a missing binary or a
/// non-zero exit propagates straight to the caller.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("{program} exited with {status}: {stderr}")]
    Failed {
        program: &'static str,
        status: ExitStatus,
        stderr: String,
    },
}

/// A resolved `ip` binary and the two invocations the report needs.
pub struct IpCommand {
    program: &'static str,
}

impl IpCommand {
    /// Resolves the `ip` binary, preferring [`PRIMARY_PATH`] and falling
    /// back to [`FALLBACK_PATH`] when the first is not an executable file.
    ///
    /// The check runs once on first use. If neither location passes, the
    /// fallback is used anyway and the spawn fails at the OS level.
    pub fn resolve() -> &'static IpCommand {
        IP_COMMAND.get_or_init(|| {
            let program = if is_executable(Path::new(PRIMARY_PATH)) {
                PRIMARY_PATH
            } else {
                FALLBACK_PATH
            };
            debug!(program, "resolved ip binary");
            IpCommand { program }
        })
    }

    /// Runs `ip addr` and returns its full standard output.
    pub fn addresses(&self) -> Result<String, CommandError> {
        self.run(&["addr"])
    }

    /// Runs `ip route show table all` and returns its full standard output.
    pub fn routes(&self) -> Result<String, CommandError> {
        self.run(&["route", "show", "table", "all"])
    }

    fn run(&self, args: &[&str]) -> Result<String, CommandError> {
        debug!(program = self.program, ?args, "invoking");

        // output() drains stdout to exhaustion and reaps the child before
        // returning, so the process handle and its pipes never outlive
        // this call.
        let output = Command::new(self.program)
            .args(args)
            .output()
            .map_err(|source| CommandError::Spawn {
                program: self.program,
                source,
            })?;

        if !output.status.success() {
            return Err(CommandError::Failed {
                program: self.program,
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        debug!(bytes = stdout.len(), "command output drained");
        Ok(stdout)
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
