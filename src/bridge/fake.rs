//! Scripted bridge for unit tests.
//!
//! Records every argument list it is asked to run and answers with canned
//! outputs, so tests can assert on the exact command order without a device.

use std::io;
use std::sync::Mutex;

use super::{BridgeError, CommandOutput, DeviceBridge};

pub struct FakeBridge {
    calls: Mutex<Vec<Vec<String>>>,
    responses: Mutex<Vec<(Vec<String>, CommandOutput)>>,
    reachable: bool,
}

impl FakeBridge {
    /// A bridge where every command succeeds with empty output
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            responses: Mutex::new(Vec::new()),
            reachable: true,
        }
    }

    /// A bridge whose program cannot be launched
    pub fn unreachable() -> Self {
        Self {
            reachable: false,
            ..Self::new()
        }
    }

    /// A bridge that lists the given serials for `adb devices`
    pub fn with_devices(serials: &[&str]) -> Self {
        let bridge = Self::new();
        let mut listing = String::from("List of devices attached\n");
        for serial in serials {
            listing.push_str(&format!("{serial}\tdevice\n"));
        }
        listing.push('\n');
        bridge.respond(&["devices"], CommandOutput {
            code: Some(0),
            stdout: listing,
            stderr: String::new(),
        });
        bridge
    }

    /// Answer any call containing `pattern` as a contiguous run of arguments.
    ///
    /// Later registrations win over earlier ones.
    pub fn respond(&self, pattern: &[&str], output: CommandOutput) {
        let pattern = pattern.iter().map(|s| s.to_string()).collect();
        self.responses.lock().expect("lock poisoned").push((pattern, output));
    }

    /// Every argument list run so far, in order
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().expect("lock poisoned").clone()
    }

    /// Calls joined into single strings, handy for ordering assertions
    pub fn joined_calls(&self) -> Vec<String> {
        self.calls().iter().map(|c| c.join(" ")).collect()
    }

    /// Index of the first call containing `needle`
    pub fn position(&self, needle: &str) -> Option<usize> {
        self.joined_calls().iter().position(|c| c.contains(needle))
    }

    /// Number of calls containing `needle`
    pub fn count(&self, needle: &str) -> usize {
        self.joined_calls().iter().filter(|c| c.contains(needle)).count()
    }
}

impl Default for FakeBridge {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceBridge for FakeBridge {
    fn run(&self, args: &[String]) -> Result<CommandOutput, BridgeError> {
        self.calls.lock().expect("lock poisoned").push(args.to_vec());

        if !self.reachable {
            return Err(BridgeError::Spawn {
                program: "adb".into(),
                source: io::Error::new(io::ErrorKind::NotFound, "not installed"),
            });
        }

        let responses = self.responses.lock().expect("lock poisoned");
        let output = responses
            .iter()
            .rev()
            .find(|(pattern, _)| {
                !pattern.is_empty() && args.windows(pattern.len()).any(|w| w == pattern.as_slice())
            })
            .map(|(_, output)| output.clone())
            .unwrap_or(CommandOutput {
                code: Some(0),
                ..Default::default()
            });
        Ok(output)
    }
}
