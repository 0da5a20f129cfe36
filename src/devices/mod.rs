/// Device command sequences
///
/// Each submodule issues one fixed sequence of `adb` commands:
/// - `commands.rs` - argument lists for every command the app sends
/// - `enumerate.rs` - list connected devices
/// - `preflight.rs` - one-time configuration of a device
/// - `storage.rs` - remote storage directory, upload and wipe
/// - `display.rs` - project an uploaded image, reboot into ship mode
///
/// All sequences run through a [`crate::bridge::CommandRunner`], one device
/// at a time, in enumeration order.

pub mod commands;
pub mod display;
pub mod enumerate;
pub mod preflight;
pub mod storage;

pub use display::{display_image, shutdown_all};
pub use enumerate::list_devices;
pub use preflight::run_preflight;
pub use storage::{upload_image, wipe_all};
