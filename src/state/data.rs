/// Shared data structures for the application state
///
/// These types flow between the UI layer, the action handlers and the
/// device command sequences.

use std::fmt;
use std::path::{Path, PathBuf};

use image::ImageFormat;
use thiserror::Error;

/// Opaque identifier of a connected device, as listed by `adb devices`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeviceId(String);

impl DeviceId {
    pub fn new(serial: impl Into<String>) -> Self {
        Self(serial.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reasons a file cannot become the current image
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IntakeError {
    #[error("not a file: {}", .0.display())]
    NotAFile(PathBuf),
    #[error("not an image: {}", .0.display())]
    UnsupportedFormat(PathBuf),
    #[error("path has no file name: {}", .0.display())]
    MissingFileName(PathBuf),
    #[error("path is not valid UTF-8: {}", .0.display())]
    NonUtf8Path(PathBuf),
}

/// The image that the next "project" action pushes to every device
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentImage {
    /// Full local path to the file
    pub path: PathBuf,
    /// File name only; the name it gets inside the remote storage directory
    pub file_name: String,
}

impl CurrentImage {
    /// Accept a local file as the current image.
    ///
    /// Only files whose extension maps to a known image format are accepted;
    /// the content itself is not decoded. The path must be valid UTF-8 since
    /// it is handed to `adb` as text.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, IntakeError> {
        let path = path.as_ref();

        if !path.is_file() {
            return Err(IntakeError::NotAFile(path.to_path_buf()));
        }

        if ImageFormat::from_path(path).is_err() {
            return Err(IntakeError::UnsupportedFormat(path.to_path_buf()));
        }

        if path.to_str().is_none() {
            return Err(IntakeError::NonUtf8Path(path.to_path_buf()));
        }

        let file_name = path
            .file_name()
            .ok_or_else(|| IntakeError::MissingFileName(path.to_path_buf()))?
            .to_str()
            .ok_or_else(|| IntakeError::NonUtf8Path(path.to_path_buf()))?
            .to_string();

        Ok(Self {
            path: path.to_path_buf(),
            file_name,
        })
    }
}
