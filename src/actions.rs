/// Action handlers
///
/// One function per user action. Each takes the bridge, the settings and the
/// session explicitly and returns a report, so the GUI and the headless CLI
/// are both thin adapters over the same code.

use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use crate::bridge::{ActionReport, BridgeError, CommandRunner, DeviceBridge};
use crate::devices;
use crate::state::data::DeviceId;
use crate::state::session::Session;
use crate::state::settings::Settings;

#[derive(Debug, Error)]
pub enum ActionError {
    #[error("No image loaded.")]
    NoImageLoaded,
    #[error(transparent)]
    Bridge(#[from] BridgeError),
}

/// Enumerate devices and, unless disabled, run preflight on each of them
pub fn connect(
    bridge: &dyn DeviceBridge,
    settings: &Settings,
) -> Result<(Vec<DeviceId>, ActionReport), ActionError> {
    let mut runner = CommandRunner::new(bridge, settings.policy);
    let devices = devices::list_devices(&mut runner)?;

    if settings.preflight {
        for device in &devices {
            devices::run_preflight(&mut runner, device)?;
        }
    }
    Ok((devices, runner.report()))
}

/// Run preflight on every device of the session
pub fn preflight(
    bridge: &dyn DeviceBridge,
    settings: &Settings,
    session: &Session,
) -> Result<ActionReport, ActionError> {
    let mut runner = CommandRunner::new(bridge, settings.policy);
    for device in &session.devices {
        devices::run_preflight(&mut runner, device)?;
    }
    Ok(runner.report())
}

/// Wipe every device, then upload and display the current image on each.
///
/// Does nothing on any device when no image is loaded.
pub fn project(
    bridge: &dyn DeviceBridge,
    settings: &Settings,
    session: &Session,
) -> Result<ActionReport, ActionError> {
    let Some(image) = &session.current_image else {
        warn!("No image loaded.");
        return Err(ActionError::NoImageLoaded);
    };

    let mut runner = CommandRunner::new(bridge, settings.policy);
    devices::wipe_all(&mut runner, settings, &session.devices)?;

    info!(path = %image.path.display(), name = %image.file_name, "projecting image");
    for device in &session.devices {
        devices::upload_image(&mut runner, settings, device, &image.path)?;
        devices::display_image(&mut runner, settings, device, &image.file_name)?;
    }
    Ok(runner.report())
}

/// Reboot every device of the session into ship mode
pub fn shutdown(
    bridge: &dyn DeviceBridge,
    settings: &Settings,
    session: &Session,
) -> Result<ActionReport, ActionError> {
    let mut runner = CommandRunner::new(bridge, settings.policy);
    devices::shutdown_all(&mut runner, &session.devices)?;
    Ok(runner.report())
}

/// Run a blocking action on the tokio blocking pool.
///
/// Errors are flattened to strings so the result can travel in a GUI message.
pub async fn spawn_action<T, F>(action: F) -> Result<T, String>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, ActionError> + Send + 'static,
{
    tokio::task::spawn_blocking(action)
        .await
        .map_err(|e| format!("Task join error: {}", e))?
        .map_err(|e| e.to_string())
}

/// [`connect`] on the blocking pool
pub async fn connect_async(
    bridge: Arc<dyn DeviceBridge>,
    settings: Settings,
) -> Result<(Vec<DeviceId>, ActionReport), String> {
    spawn_action(move || connect(bridge.as_ref(), &settings)).await
}

/// [`project`] on the blocking pool, against a snapshot of the session
pub async fn project_async(
    bridge: Arc<dyn DeviceBridge>,
    settings: Settings,
    session: Session,
) -> Result<ActionReport, String> {
    spawn_action(move || project(bridge.as_ref(), &settings, &session)).await
}

/// [`shutdown`] on the blocking pool, against a snapshot of the session
pub async fn shutdown_async(
    bridge: Arc<dyn DeviceBridge>,
    settings: Settings,
    session: Session,
) -> Result<ActionReport, String> {
    spawn_action(move || shutdown(bridge.as_ref(), &settings, &session)).await
}
