/// State management module
///
/// This module holds everything the application knows between actions:
/// - Device identifiers and the current image (data.rs)
/// - The session object passed to every action (session.rs)
/// - Runtime settings parsed from the command line (settings.rs)

pub mod data;
pub mod session;
pub mod settings;
