use std::process::ExitCode;

/// Exit status for CLI commands.
///
/// - `Success` (0): Every document was processed
/// - `Failure` (1): The command ran but at least one document failed
/// - `Error` (2): The command could not run (bad config, unreadable input, invalid payload)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
