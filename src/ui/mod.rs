/// UI building blocks
///
/// - `drop_zone.rs` - image drop target with preview
/// - `status.rs` - status line text for finished actions

pub mod drop_zone;
pub mod status;
