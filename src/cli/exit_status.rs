use std::process::ExitCode;

use super::commands::CommandResult;

/// Process exit status of `xliffer`.
///
/// - `Success` (0): the command did its work; warnings alone never fail
/// - `Failure` (1): `check` found errors, or an edit or `init` was refused
/// - `Error` (2): the command could not run (unreadable or invalid XLIFF, bad config, I/O)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
    Error,
}

impl ExitStatus {
    /// Exit status of a command that ran to completion.
    pub fn from_result(result: &CommandResult) -> Self {
        if result.exit_on_errors && result.error_count > 0 {
            ExitStatus::Failure
        } else {
            ExitStatus::Success
        }
    }
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
