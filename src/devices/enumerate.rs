use tracing::{info, warn};

use super::commands;
use crate::bridge::{BridgeError, CommandRunner};
use crate::state::data::DeviceId;

/// Parse the stdout of `adb devices`.
///
/// The first line is the "List of devices attached" header. Every following
/// line contributes its first tab-separated field, in listing order.
pub fn parse_device_list(stdout: &str) -> Vec<DeviceId> {
    stdout
        .trim()
        .lines()
        .skip(1)
        .filter_map(|line| line.split('\t').next())
        .map(str::trim)
        .filter(|serial| !serial.is_empty())
        .map(DeviceId::new)
        .collect()
}

/// List connected devices.
///
/// If `adb` cannot be launched the list is empty (best-effort) or the
/// launch error is returned (strict).
pub fn list_devices(runner: &mut CommandRunner<'_>) -> Result<Vec<DeviceId>, BridgeError> {
    let devices = match runner.probe(commands::list_devices())? {
        Some(output) => parse_device_list(&output.stdout),
        None => {
            warn!("adb unavailable, no devices");
            Vec::new()
        }
    };

    info!(
        "Connected devices: {:?}",
        devices.iter().map(DeviceId::as_str).collect::<Vec<_>>()
    );
    Ok(devices)
}
