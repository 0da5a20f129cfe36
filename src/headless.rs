/// Headless subcommands
///
/// Same handlers as the window, driven from the command line. Each command
/// enumerates devices itself since there is no long-lived session.

use std::path::PathBuf;

use anyhow::Context;
use clap::Subcommand;
use tracing::info;

use crate::actions;
use crate::bridge::{ActionReport, DeviceBridge};
use crate::state::data::CurrentImage;
use crate::state::session::Session;
use crate::state::settings::Settings;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List connected devices
    Devices,
    /// Run the preflight configuration on every device
    Preflight,
    /// Push an image to every device and display it
    Project { image: PathBuf },
    /// Reboot every device into ship mode
    Shutdown,
}

pub fn run(
    command: Command,
    bridge: &dyn DeviceBridge,
    settings: &Settings,
) -> anyhow::Result<ActionReport> {
    let listing = Settings {
        preflight: false,
        ..settings.clone()
    };

    let report = match command {
        Command::Devices => {
            let (devices, report) = actions::connect(bridge, &listing)?;
            for device in &devices {
                println!("{device}");
            }
            report
        }
        Command::Preflight => {
            let (devices, mut report) = actions::connect(bridge, &listing)?;
            report.merge(actions::preflight(bridge, settings, &Session::new(devices))?);
            report
        }
        Command::Project { image } => {
            // no device is touched until the image is known to be usable
            let image = CurrentImage::from_path(&image)
                .with_context(|| format!("cannot project {}", image.display()))?;
            let (devices, mut report) = actions::connect(bridge, settings)?;
            let session = Session {
                devices,
                current_image: Some(image),
            };
            report.merge(actions::project(bridge, settings, &session)?);
            report
        }
        Command::Shutdown => {
            let (devices, mut report) = actions::connect(bridge, &listing)?;
            report.merge(actions::shutdown(bridge, settings, &Session::new(devices))?);
            report
        }
    };

    info!(commands = report.commands, failures = report.failures, "done");
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::fake::FakeBridge;

    #[test]
    fn test_project_with_missing_image_touches_no_device() {
        let bridge = FakeBridge::with_devices(&["A", "B"]);
        let command = Command::Project {
            image: PathBuf::from("/nonexistent/slide.png"),
        };

        let err = run(command, &bridge, &Settings::default()).unwrap_err();

        assert!(err.to_string().contains("cannot project"));
        assert!(bridge.calls().is_empty());
    }

    #[test]
    fn test_project_with_non_image_touches_no_device() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, b"hello").unwrap();
        let bridge = FakeBridge::with_devices(&["A"]);

        assert!(run(Command::Project { image: path }, &bridge, &Settings::default()).is_err());
        assert!(bridge.calls().is_empty());
    }

    #[test]
    fn test_project_preflights_then_projects() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("slide.png");
        std::fs::write(&path, b"").unwrap();
        let bridge = FakeBridge::with_devices(&["A"]);

        run(Command::Project { image: path }, &bridge, &Settings::default()).unwrap();

        let root = bridge.position("wait-for-device root").unwrap();
        let push = bridge.position(" push ").unwrap();
        assert!(root < push);
        assert_eq!(bridge.count("bypass-video predistort"), 1);
    }

    #[test]
    fn test_shutdown_skips_preflight() {
        let bridge = FakeBridge::with_devices(&["A", "B"]);

        let report = run(Command::Shutdown, &bridge, &Settings::default()).unwrap();

        assert_eq!(
            bridge.joined_calls(),
            vec!["devices", "-s A shell reboot shipmode", "-s B shell reboot shipmode"]
        );
        assert_eq!(report.commands, 3);
    }

    #[test]
    fn test_preflight_runs_once_per_device() {
        let bridge = FakeBridge::with_devices(&["A"]);

        run(Command::Preflight, &bridge, &Settings::default()).unwrap();

        assert_eq!(bridge.count("wait-for-device root"), 1);
    }
}
