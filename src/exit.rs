//! Process exit codes
//!
//! Every code the driver can terminate with is listed here so CI pipelines
//! can branch on them. `builddriver exit-codes` prints this table.

use std::fmt;
use std::process::ExitCode;

/// Reason the driver terminated, each with its own exit code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExitReason {
    /// Backend reported a successful build
    Success,
    /// Driver-side failure unrelated to argument validation
    DriverError,
    /// Backend reported a failed build
    BuildFailed,
    /// Backend reported a cancelled build
    BuildCancelled,
    /// Backend reported a result the driver does not recognize
    BuildUnknown,
    /// `-projectPath` was not given
    MissingProjectPath,
    /// `-buildTarget` was not given
    MissingBuildTarget,
    /// `-buildTarget` is not a supported platform name
    InvalidBuildTarget,
    /// Neither `-customBuildPath` nor `-buildPath` was given
    MissingCustomBuildPath,
    /// `-androidVersionCode` is not a valid integer
    InvalidAndroidVersionCode,
}

impl ExitReason {
    /// All reasons, in table order
    pub const ALL: [ExitReason; 10] = [
        ExitReason::Success,
        ExitReason::DriverError,
        ExitReason::BuildFailed,
        ExitReason::BuildCancelled,
        ExitReason::BuildUnknown,
        ExitReason::MissingProjectPath,
        ExitReason::MissingBuildTarget,
        ExitReason::InvalidBuildTarget,
        ExitReason::MissingCustomBuildPath,
        ExitReason::InvalidAndroidVersionCode,
    ];

    /// Numeric process exit code
    pub fn code(self) -> u8 {
        match self {
            ExitReason::Success => 0,
            ExitReason::DriverError => 1,
            ExitReason::BuildFailed => 101,
            ExitReason::BuildCancelled => 102,
            ExitReason::BuildUnknown => 103,
            ExitReason::MissingProjectPath => 110,
            ExitReason::MissingBuildTarget => 120,
            ExitReason::InvalidBuildTarget => 121,
            ExitReason::MissingCustomBuildPath => 130,
            ExitReason::InvalidAndroidVersionCode => 131,
        }
    }

    /// One-line description for the operator table
    pub fn description(self) -> &'static str {
        match self {
            ExitReason::Success => "build succeeded",
            ExitReason::DriverError => {
                "driver error (settings file, backend launch or report)"
            }
            ExitReason::BuildFailed => "build failed",
            ExitReason::BuildCancelled => "build cancelled",
            ExitReason::BuildUnknown => "build result unknown",
            ExitReason::MissingProjectPath => "missing -projectPath",
            ExitReason::MissingBuildTarget => "missing -buildTarget",
            ExitReason::InvalidBuildTarget => "invalid -buildTarget",
            ExitReason::MissingCustomBuildPath => "missing -customBuildPath or -buildPath",
            ExitReason::InvalidAndroidVersionCode => "invalid -androidVersionCode",
        }
    }
}

impl fmt::Display for ExitReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>3}  {}", self.code(), self.description())
    }
}

impl From<ExitReason> for ExitCode {
    fn from(reason: ExitReason) -> Self {
        ExitCode::from(reason.code())
    }
}
