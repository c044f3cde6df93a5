use std::process::ExitCode;

/// Process exit status of a csprops command.
///
/// - `Success` (0): done, nothing left to do
/// - `Failure` (1): hardcoded values found by `scan`, an `extract` dry run with a
///   pending change, or a property that could not be written
/// - `Error` (2): the command could not run (bad config, unreadable document, ...)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    /// Work remains or part of an extraction failed.
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
