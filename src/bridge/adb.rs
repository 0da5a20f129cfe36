use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use super::{BridgeError, CommandOutput, DeviceBridge};

/// Default program name, resolved through PATH
pub const DEFAULT_ADB: &str = "adb";

/// Bridge backed by the real `adb` executable.
///
/// Every call spawns a new process and blocks until it exits. No timeout is
/// imposed here; `adb` applies its own.
#[derive(Debug, Clone)]
pub struct AdbBridge {
    program: PathBuf,
}

impl AdbBridge {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl Default for AdbBridge {
    fn default() -> Self {
        Self::new(DEFAULT_ADB)
    }
}

impl DeviceBridge for AdbBridge {
    fn run(&self, args: &[String]) -> Result<CommandOutput, BridgeError> {
        let output = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| BridgeError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        Ok(CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
