/// Argument lists for every `adb` command the application sends.
///
/// Kept as plain builders so the sequences read as a list of steps and the
/// tests can compare against the exact arguments.

use crate::state::data::DeviceId;

/// Marker `ls` prints on stderr when the directory is missing
pub const NOT_FOUND_MARKER: &str = "No such file or directory";

/// `adb devices`
pub fn list_devices() -> Vec<String> {
    vec!["devices".to_string()]
}

/// `adb -s <serial> <args...>`
pub fn on_device(device: &DeviceId, args: &[&str]) -> Vec<String> {
    let mut full = Vec::with_capacity(args.len() + 2);
    full.push("-s".to_string());
    full.push(device.as_str().to_string());
    full.extend(args.iter().map(|a| a.to_string()));
    full
}

/// `adb -s <serial> shell <args...>`
pub fn shell(device: &DeviceId, args: &[&str]) -> Vec<String> {
    let mut with_shell = Vec::with_capacity(args.len() + 1);
    with_shell.push("shell");
    with_shell.extend_from_slice(args);
    on_device(device, &with_shell)
}

/// Wait for the device, then restart adbd as root
pub fn wait_and_root(device: &DeviceId) -> Vec<String> {
    on_device(device, &["wait-for-device", "root"])
}

/// `input keyevent KEYCODE_<NAME>`; the name is upper-cased
pub fn keyevent(device: &DeviceId, name: &str) -> Vec<String> {
    let keycode = format!("KEYCODE_{}", name.to_uppercase());
    shell(device, &["input", "keyevent", &keycode])
}

pub fn screen_on(device: &DeviceId) -> Vec<String> {
    shell(device, &["ats", "display", "-screen", "on"])
}

pub fn ls(device: &DeviceId, path: &str) -> Vec<String> {
    shell(device, &["ls", path])
}

pub fn mkdir(device: &DeviceId, path: &str) -> Vec<String> {
    shell(device, &["mkdir", path])
}

pub fn rm_rf(device: &DeviceId, path: &str) -> Vec<String> {
    shell(device, &["rm", "-rf", path])
}

pub fn push(device: &DeviceId, local: &str, remote_dir: &str) -> Vec<String> {
    on_device(device, &["push", local, remote_dir])
}

/// Render a device-side file with the projector's predistort transform,
/// bypassing normal video compositing
pub fn predistort(device: &DeviceId, remote_path: &str) -> Vec<String> {
    shell(
        device,
        &["cmd", "SurfaceFlinger", "bypass-video", "predistort", remote_path],
    )
}

pub fn reboot_shipmode(device: &DeviceId) -> Vec<String> {
    shell(device, &["reboot", "shipmode"])
}
