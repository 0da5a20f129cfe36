/// Runtime settings
///
/// Built once at startup from command-line arguments and passed by reference
/// to every device sequence. Nothing is read from or written to disk.

/// Default directory on the device that holds pushed images
pub const DEFAULT_STORAGE_DIR: &str = "/data/projector_display_storage";

/// What to do when a bridge command fails
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Log the failure and carry on with the rest of the sequence
    #[default]
    BestEffort,
    /// Abort the sequence at the first failing command
    Strict,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Remote storage directory on every device
    pub storage_dir: String,
    pub policy: FailurePolicy,
    /// Run the preflight sequence whenever devices are enumerated
    pub preflight: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            storage_dir: DEFAULT_STORAGE_DIR.to_string(),
            policy: FailurePolicy::BestEffort,
            preflight: true,
        }
    }
}

impl Settings {
    /// Device-side path of a file inside the storage directory
    pub fn remote_path(&self, file_name: &str) -> String {
        format!("{}/{}", self.storage_dir.trim_end_matches('/'), file_name)
    }

    /// Glob matching everything inside the storage directory
    pub fn storage_glob(&self) -> String {
        self.remote_path("*")
    }
}
