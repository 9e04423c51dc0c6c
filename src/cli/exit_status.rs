use std::process::ExitCode;

/// Exit status of the CLI.
///
/// - `Success` (0): catalogs synced; stale-key warnings do not change this
/// - `Error` (2): the run failed (unreadable input, malformed catalog, bad config)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    /// Run completed, possibly with warnings.
    Success,
    /// Run aborted on an error.
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
