use std::path::Path;

use tracing::{debug, info};

use super::commands::{self, NOT_FOUND_MARKER};
use crate::bridge::{BridgeError, CommandRunner};
use crate::state::data::DeviceId;
use crate::state::settings::Settings;

/// Create the remote storage directory if `ls` reports it missing.
///
/// Returns true if a `mkdir` was issued.
pub fn ensure_storage_dir(
    runner: &mut CommandRunner<'_>,
    settings: &Settings,
    device: &DeviceId,
) -> Result<bool, BridgeError> {
    let Some(output) = runner.probe(commands::ls(device, &settings.storage_dir))? else {
        return Ok(false);
    };
    if !output.stderr.is_empty() {
        debug!(serial = %device, stderr = %output.stderr.trim(), "ls storage dir");
    }

    if output.stderr.contains(NOT_FOUND_MARKER) {
        runner.call(commands::mkdir(device, &settings.storage_dir))?;
        info!(serial = %device, dir = %settings.storage_dir, "New dir created");
        return Ok(true);
    }
    Ok(false)
}

/// Push a local file into the storage directory of one device
pub fn upload_image(
    runner: &mut CommandRunner<'_>,
    settings: &Settings,
    device: &DeviceId,
    local: &Path,
) -> Result<(), BridgeError> {
    ensure_storage_dir(runner, settings, device)?;
    runner.call(commands::push(
        device,
        &local.to_string_lossy(),
        &settings.storage_dir,
    ))
}

/// Empty the storage directory on every device, in order
pub fn wipe_all(
    runner: &mut CommandRunner<'_>,
    settings: &Settings,
    devices: &[DeviceId],
) -> Result<(), BridgeError> {
    for device in devices {
        ensure_storage_dir(runner, settings, device)?;
        runner.call(commands::rm_rf(device, &settings.storage_glob()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::fake::FakeBridge;
    use crate::bridge::CommandOutput;
    use crate::state::settings::FailurePolicy;

    fn missing_dir() -> CommandOutput {
        CommandOutput {
            code: Some(1),
            stdout: String::new(),
            stderr: "ls: /data/projector_display_storage: No such file or directory\n".into(),
        }
    }

    #[test]
    fn test_upload_creates_missing_dir_once() {
        let bridge = FakeBridge::new();
        bridge.respond(&["ls"], missing_dir());
        let mut runner = CommandRunner::new(&bridge, FailurePolicy::BestEffort);
        let settings = Settings::default();

        upload_image(&mut runner, &settings, &DeviceId::new("A"), Path::new("/tmp/a.png")).unwrap();

        assert_eq!(
            bridge.joined_calls(),
            vec![
                "-s A shell ls /data/projector_display_storage",
                "-s A shell mkdir /data/projector_display_storage",
                "-s A push /tmp/a.png /data/projector_display_storage",
            ]
        );
    }

    #[test]
    fn test_ensure_storage_dir_reports_mkdir() {
        let bridge = FakeBridge::new();
        bridge.respond(&["-s", "B", "shell", "ls"], missing_dir());
        let mut runner = CommandRunner::new(&bridge, FailurePolicy::BestEffort);
        let settings = Settings::default();

        assert!(!ensure_storage_dir(&mut runner, &settings, &DeviceId::new("A")).unwrap());
        assert!(ensure_storage_dir(&mut runner, &settings, &DeviceId::new("B")).unwrap());
        assert_eq!(bridge.count("mkdir"), 1);
    }

    #[test]
    fn test_ensure_storage_dir_without_adb() {
        let bridge = FakeBridge::unreachable();
        let mut runner = CommandRunner::new(&bridge, FailurePolicy::BestEffort);

        assert!(!ensure_storage_dir(&mut runner, &Settings::default(), &DeviceId::new("A")).unwrap());
        assert_eq!(bridge.calls().len(), 1);
    }

    #[test]
    fn test_upload_skips_mkdir_when_dir_exists() {
        let bridge = FakeBridge::new();
        let mut runner = CommandRunner::new(&bridge, FailurePolicy::BestEffort);

        upload_image(&mut runner, &Settings::default(), &DeviceId::new("A"), Path::new("a.png"))
            .unwrap();

        assert_eq!(bridge.count("mkdir"), 0);
        assert_eq!(bridge.count("push"), 1);
    }

    #[test]
    fn test_push_happens_even_if_mkdir_fails() {
        let bridge = FakeBridge::new();
        bridge.respond(&["ls"], missing_dir());
        bridge.respond(&["mkdir"], CommandOutput {
            code: Some(1),
            stderr: "mkdir: Permission denied".into(),
            ..Default::default()
        });
        let mut runner = CommandRunner::new(&bridge, FailurePolicy::BestEffort);

        upload_image(&mut runner, &Settings::default(), &DeviceId::new("A"), Path::new("a.png"))
            .unwrap();

        assert_eq!(bridge.count("push"), 1);
        assert_eq!(runner.report().failures, 1);
    }

    #[test]
    fn test_wipe_all_devices_in_order() {
        let bridge = FakeBridge::new();
        bridge.respond(&["-s", "B", "shell", "ls"], missing_dir());
        let mut runner = CommandRunner::new(&bridge, FailurePolicy::BestEffort);
        let devices = [DeviceId::new("A"), DeviceId::new("B")];

        wipe_all(&mut runner, &Settings::default(), &devices).unwrap();

        assert_eq!(
            bridge.joined_calls(),
            vec![
                "-s A shell ls /data/projector_display_storage",
                "-s A shell rm -rf /data/projector_display_storage/*",
                "-s B shell ls /data/projector_display_storage",
                "-s B shell mkdir /data/projector_display_storage",
                "-s B shell rm -rf /data/projector_display_storage/*",
            ]
        );
    }
}
