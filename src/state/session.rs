use std::path::Path;

use tracing::info;

use super::data::{CurrentImage, DeviceId, IntakeError};

/// Everything an action needs to know about the outside world.
///
/// Holds the devices from the most recent enumeration and the image that
/// the next projection will push. Cheap to clone so a snapshot can be handed
/// to a background task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub devices: Vec<DeviceId>,
    pub current_image: Option<CurrentImage>,
}

impl Session {
    pub fn new(devices: Vec<DeviceId>) -> Self {
        Self {
            devices,
            current_image: None,
        }
    }

    /// Replace the current image with the file at `path`.
    ///
    /// On error the previous image is kept.
    pub fn load_image(&mut self, path: impl AsRef<Path>) -> Result<&CurrentImage, IntakeError> {
        let image = CurrentImage::from_path(path)?;
        info!(path = %image.path.display(), name = %image.file_name, "image loaded");
        Ok(self.current_image.insert(image))
    }

    pub fn has_image(&self) -> bool {
        self.current_image.is_some()
    }
}
