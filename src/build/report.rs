//! Build result reporting
//!
//! Prints the outcome summary and maps the outcome status to the process
//! exit code.

use std::time::Duration;

use super::{BuildOutcome, BuildStatus};
use crate::exit::ExitReason;
use crate::utils::terminal::{banner, print_error, print_success};

/// Exit code for a backend status
pub fn exit_reason(status: BuildStatus) -> ExitReason {
    match status {
        BuildStatus::Succeeded => ExitReason::Success,
        BuildStatus::Failed => ExitReason::BuildFailed,
        BuildStatus::Cancelled => ExitReason::BuildCancelled,
        BuildStatus::Unknown => ExitReason::BuildUnknown,
    }
}

/// Final status line for a backend status
pub fn status_message(status: BuildStatus) -> &'static str {
    match status {
        BuildStatus::Succeeded => "Build succeeded!",
        BuildStatus::Failed => "Build failed!",
        BuildStatus::Cancelled => "Build cancelled!",
        BuildStatus::Unknown => "Build result is unknown!",
    }
}

/// Format duration as `HH:MM:SS.mmm`
pub fn format_duration(duration: Duration) -> String {
    let total_secs = duration.as_secs();
    format!(
        "{:02}:{:02}:{:02}.{:03}",
        total_secs / 3600,
        (total_secs / 60) % 60,
        total_secs % 60,
        duration.subsec_millis()
    )
}

/// Render the "Build results" block
pub fn format_summary(outcome: &BuildOutcome) -> String {
    format!(
        "{}\nDuration: {}\nWarnings: {}\nErrors: {}\nSize: {} bytes\n",
        banner("Build results"),
        format_duration(outcome.duration),
        outcome.total_warnings,
        outcome.total_errors,
        outcome.total_size
    )
}

/// Print the summary and status line, returning the exit code to use
pub fn report(outcome: &BuildOutcome) -> ExitReason {
    println!("{}", format_summary(outcome));

    let message = status_message(outcome.status);
    match outcome.status {
        BuildStatus::Succeeded => print_success(message),
        BuildStatus::Failed | BuildStatus::Cancelled | BuildStatus::Unknown => {
            print_error(message)
        }
    }

    exit_reason(outcome.status)
}
