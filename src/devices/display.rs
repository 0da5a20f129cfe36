use tracing::info;

use super::commands;
use crate::bridge::{BridgeError, CommandRunner};
use crate::state::data::DeviceId;
use crate::state::settings::Settings;

/// Wake the screen and render an uploaded image with the predistort transform.
///
/// `file_name` is the name inside the storage directory, not a local path.
pub fn display_image(
    runner: &mut CommandRunner<'_>,
    settings: &Settings,
    device: &DeviceId,
    file_name: &str,
) -> Result<(), BridgeError> {
    runner.call(commands::screen_on(device))?;
    runner.call(commands::predistort(device, &settings.remote_path(file_name)))?;
    info!(serial = %device, "Image displayed");
    Ok(())
}

/// Reboot every device into ship mode, in enumeration order
pub fn shutdown_all(runner: &mut CommandRunner<'_>, devices: &[DeviceId]) -> Result<(), BridgeError> {
    for device in devices {
        info!(serial = %device, "reboot into ship mode");
        runner.call(commands::reboot_shipmode(device))?;
    }
    Ok(())
}
