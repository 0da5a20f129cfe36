/// Device bridge module
///
/// Everything that talks to the external `adb` tool goes through the
/// [`DeviceBridge`] trait:
/// - `adb.rs` - the real subprocess-backed implementation
/// - `fake.rs` - a scripted, recording bridge for unit tests
///
/// The [`CommandRunner`] applies the configured [`FailurePolicy`] on top of a
/// bridge and counts what was issued, so device sequences never inspect exit
/// codes themselves.

pub mod adb;
#[cfg(test)]
pub mod fake;

use std::io;
use std::path::PathBuf;

use thiserror::Error;
use tracing::{debug, warn};

use crate::state::settings::FailurePolicy;

pub use adb::AdbBridge;

/// Captured result of one bridge invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code (None if the process was killed by a signal)
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// True if the bridge tool exited with status 0
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Errors produced while running bridge commands
#[derive(Debug, Error)]
pub enum BridgeError {
    /// The bridge tool could not be started at all (not installed, bad path)
    #[error("failed to launch {program}: {source}")]
    Spawn {
        program: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The bridge tool ran but exited non-zero
    #[error("`adb {}` exited with code {:?}: {}", .args.join(" "), .code, .stderr.trim())]
    Failed {
        args: Vec<String>,
        code: Option<i32>,
        stderr: String,
    },
}

/// Capability to run a single device-bridge command.
///
/// `args` are the arguments after the program name, e.g.
/// `["-s", "SERIAL", "shell", "ls", "/data"]`.
pub trait DeviceBridge: Send + Sync {
    fn run(&self, args: &[String]) -> Result<CommandOutput, BridgeError>;
}

/// Summary of a command sequence
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActionReport {
    /// Number of bridge commands issued
    pub commands: usize,
    /// Number of commands that failed (spawn error or non-zero exit)
    pub failures: usize,
}

impl ActionReport {
    pub fn merge(&mut self, other: ActionReport) {
        self.commands += other.commands;
        self.failures += other.failures;
    }
}

/// Runs commands against a bridge, applying the failure policy.
///
/// In [`FailurePolicy::BestEffort`] a failing command is logged and the
/// caller carries on. In [`FailurePolicy::Strict`] the first failure is
/// returned as an error.
pub struct CommandRunner<'a> {
    bridge: &'a dyn DeviceBridge,
    policy: FailurePolicy,
    report: ActionReport,
}

impl<'a> CommandRunner<'a> {
    pub fn new(bridge: &'a dyn DeviceBridge, policy: FailurePolicy) -> Self {
        Self {
            bridge,
            policy,
            report: ActionReport::default(),
        }
    }

    /// Issue a command whose outcome is only checked against the policy
    pub fn call(&mut self, args: Vec<String>) -> Result<(), BridgeError> {
        self.execute(args, true).map(|_| ())
    }

    /// Issue a command whose output the caller wants to read.
    ///
    /// A non-zero exit is an expected answer here (e.g. `ls` on a missing
    /// directory) and never counts as a failure. Returns `None` only when
    /// the bridge could not be launched in best-effort mode.
    pub fn probe(&mut self, args: Vec<String>) -> Result<Option<CommandOutput>, BridgeError> {
        self.execute(args, false)
    }

    pub fn report(&self) -> ActionReport {
        self.report
    }

    fn execute(
        &mut self,
        args: Vec<String>,
        check_status: bool,
    ) -> Result<Option<CommandOutput>, BridgeError> {
        debug!(args = ?args, "adb");
        self.report.commands += 1;

        let output = match self.bridge.run(&args) {
            Ok(output) => output,
            Err(err) => {
                self.report.failures += 1;
                return match self.policy {
                    FailurePolicy::Strict => Err(err),
                    FailurePolicy::BestEffort => {
                        warn!("{err}");
                        Ok(None)
                    }
                };
            }
        };

        if check_status && !output.success() {
            self.report.failures += 1;
            let err = BridgeError::Failed {
                args,
                code: output.code,
                stderr: output.stderr.clone(),
            };
            match self.policy {
                FailurePolicy::Strict => return Err(err),
                FailurePolicy::BestEffort => warn!("{err}"),
            }
        }

        Ok(Some(output))
    }
}
