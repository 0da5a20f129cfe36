use tracing::info;

use super::commands;
use crate::bridge::{BridgeError, CommandRunner};
use crate::state::data::DeviceId;

/// Shell commands that put a projector into a display-ready state, in order.
///
/// Mesh rendering, the display controller and onboarding are turned off,
/// the screen is forced on, SELinux and hidden-API checks are relaxed, and
/// the lock screen and screen-off timeout are taken out of the way.
pub const CONFIGURATION: [&[&str]; 10] = [
    &["cmd", "SurfaceFlinger", "display-features", "disable-mesh-rendering"],
    &["cmd", "power", "disable-humane-display-controller"],
    &["cmd", "package", "disable", "humane.experience.onboarding/.OnboardingHome"],
    &["ats", "display", "-screen", "on"],
    &["setenforce", "0"],
    &["settings", "put", "global", "hidden_api_policy", "1"],
    // escaped so the device shell does not expand it
    &["settings", "put", "global", "hidden_api_blacklist_exemptions", "\\*"],
    &["settings", "put", "global", "policy_control", "immersive.full=*"],
    &["locksettings", "set-disabled", "true"],
    &["settings", "put", "system", "screen_off_timeout", "2147483647"],
];

/// Configure one device: root adbd, wake and unlock, then send the
/// [`CONFIGURATION`] commands.
///
/// In best-effort mode every command is sent regardless of how the previous
/// one went.
pub fn run_preflight(runner: &mut CommandRunner<'_>, device: &DeviceId) -> Result<(), BridgeError> {
    info!(serial = %device, "preflight");

    runner.call(commands::wait_and_root(device))?;
    unlock(runner, device)?;

    for step in CONFIGURATION {
        runner.call(commands::shell(device, step))?;
    }
    Ok(())
}

fn unlock(runner: &mut CommandRunner<'_>, device: &DeviceId) -> Result<(), BridgeError> {
    runner.call(commands::keyevent(device, "wakeup"))?;
    runner.call(commands::keyevent(device, "menu"))
}
