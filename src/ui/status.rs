use crate::bridge::ActionReport;

/// User action that runs a device sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Connect,
    Project,
    Shutdown,
}

impl Action {
    pub fn label(self) -> &'static str {
        match self {
            Action::Connect => "Device setup",
            Action::Project => "Projection",
            Action::Shutdown => "Ship mode shutdown",
        }
    }

    /// Status line while the action is running
    pub fn in_progress(self) -> &'static str {
        match self {
            Action::Connect => "Connecting to devices...",
            Action::Project => "Projecting image...",
            Action::Shutdown => "Rebooting devices into ship mode...",
        }
    }
}

/// Status line for a finished action
pub fn describe(action: Action, result: &Result<ActionReport, String>) -> String {
    match result {
        Ok(report) if report.failures == 0 => {
            format!("{} done ({} commands).", action.label(), report.commands)
        }
        Ok(report) => format!(
            "{} done, {} of {} commands failed (see log).",
            action.label(),
            report.failures,
            report.commands
        ),
        Err(err) => format!("{} failed: {}", action.label(), err),
    }
}
