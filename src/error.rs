//! Error types and helpers for user-friendly error messages
//!
//! Every error the driver reports carries the exit code it terminates with,
//! plus an optional hint telling the operator how to fix the invocation.

use std::num::ParseIntError;

use thiserror::Error;

use crate::exit::ExitReason;

/// Driver errors with exit codes and actionable hints
#[derive(Error, Debug)]
pub enum DriverError {
    /// A required flag was not passed
    #[error("Missing argument -{flag}")]
    MissingArgument {
        flag: String,
        reason: ExitReason,
        hint: String,
    },

    /// `-buildTarget` names an unsupported platform
    #[error("Invalid build target '{value}'")]
    InvalidBuildTarget { value: String },

    /// `-androidVersionCode` is not an unsigned integer
    #[error("Invalid Android version code '{value}'")]
    InvalidVersionCode {
        value: String,
        #[source]
        source: ParseIntError,
    },

    /// Project build settings file errors
    #[error("Build settings error: {message}")]
    Settings {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
        hint: Option<String>,
    },

    /// Backend executable not found
    #[error("Missing tool: {tool}")]
    MissingTool {
        tool: String,
        required_for: String,
        hint: String,
    },

    /// Backend could not be run or its report could not be read
    #[error("Build backend error: {message}")]
    Backend {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
        hint: Option<String>,
    },
}

impl DriverError {
    /// Create a missing argument error for the given flag
    pub fn missing_argument(flag: impl Into<String>, reason: ExitReason) -> Self {
        let flag = flag.into();
        let hint = hints::missing_flag(&flag);
        Self::MissingArgument { flag, reason, hint }
    }

    /// Create a settings error with a hint
    pub fn settings_error_with_hint(
        message: impl Into<String>,
        source: Option<anyhow::Error>,
        hint: impl Into<String>,
    ) -> Self {
        Self::Settings {
            message: message.into(),
            source,
            hint: Some(hint.into()),
        }
    }

    /// Create a missing tool error
    pub fn missing_tool(
        tool: impl Into<String>,
        required_for: impl Into<String>,
        hint: impl Into<String>,
    ) -> Self {
        Self::MissingTool {
            tool: tool.into(),
            required_for: required_for.into(),
            hint: hint.into(),
        }
    }

    /// Create a backend error with hint
    pub fn backend_error_with_hint(
        message: impl Into<String>,
        source: Option<anyhow::Error>,
        hint: impl Into<String>,
    ) -> Self {
        Self::Backend {
            message: message.into(),
            source,
            hint: Some(hint.into()),
        }
    }

    /// Exit code this error terminates the process with
    pub fn exit_reason(&self) -> ExitReason {
        match self {
            DriverError::MissingArgument { reason, .. } => *reason,
            DriverError::InvalidBuildTarget { .. } => ExitReason::InvalidBuildTarget,
            DriverError::InvalidVersionCode { .. } => ExitReason::InvalidAndroidVersionCode,
            DriverError::Settings { .. }
            | DriverError::MissingTool { .. }
            | DriverError::Backend { .. } => ExitReason::DriverError,
        }
    }

    /// The hint shown below the error, if any
    pub fn hint(&self) -> Option<String> {
        match self {
            DriverError::MissingArgument { hint, .. } | DriverError::MissingTool { hint, .. } => {
                Some(hint.clone())
            }
            DriverError::InvalidBuildTarget { .. } => Some(hints::supported_targets()),
            DriverError::InvalidVersionCode { .. } => Some(hints::android_version_code().into()),
            DriverError::Settings { hint, .. } | DriverError::Backend { hint, .. } => hint.clone(),
        }
    }

    /// Display error with formatting and hints
    pub fn display_with_hints(&self) {
        use console::style;

        eprintln!("\n{} {}", style("ERROR:").red().bold(), self);

        if let DriverError::MissingTool { required_for, .. } = self {
            eprintln!("  required for: {}", required_for);
        }

        let mut cause = std::error::Error::source(self);
        while let Some(err) = cause {
            eprintln!("  caused by: {}", err);
            cause = err.source();
        }

        if let Some(h) = self.hint() {
            eprintln!("\n{} {}", style("HINT:").yellow().bold(), h);
        }

        eprintln!();
    }
}

/// Common error hints
pub mod hints {
    use crate::build::BuildTarget;

    /// Get hint for a missing required flag
    pub fn missing_flag(flag: &str) -> String {
        match flag {
            "customBuildPath" => "Pass the output location with -customBuildPath <path> \
                 (or its alias -buildPath <path>)"
                .to_string(),
            "buildTarget" => format!(
                "Pass the platform with -buildTarget <name>.\n{}",
                supported_targets()
            ),
            _ => format!("Pass -{} <value> on the command line", flag),
        }
    }

    /// Get hint listing every supported build target
    pub fn supported_targets() -> String {
        let names: Vec<&str> = BuildTarget::ALL.iter().map(|t| t.name()).collect();
        format!(
            "Supported targets (case-sensitive): {}",
            names.join(", ")
        )
    }

    /// Get hint for an invalid Android version code
    pub fn android_version_code() -> &'static str {
        "-androidVersionCode must be a positive whole number, e.g. -androidVersionCode 42"
    }

    /// Get hint for a missing build settings file
    pub fn build_settings_not_found() -> &'static str {
        "Could not find BuildSettings.toml in the project path.\n\
         \n\
         Create one next to your project, for example:\n\
         \n\
         [[scenes]]\n\
         path = \"Assets/Scenes/Main.unity\"\n\
         \n\
         [backend]\n\
         program = \"unity-batch-build\"\n\
         \n\
         Or point to it with --settings <path> / BUILDDRIVER_SETTINGS."
    }

    /// Get hint for an invalid build settings file
    pub fn invalid_build_settings() -> &'static str {
        "BuildSettings.toml is invalid. Common issues:\n\
         • Missing [backend] section or backend.program\n\
         • Scene entries without a path\n\
         • Invalid TOML syntax (check quotes, brackets, commas)"
    }

    /// Get hint for a backend program that cannot be found
    pub fn backend_program(program: &str) -> String {
        format!(
            "Make sure '{}' is installed and on your PATH, or set backend.program \
             in BuildSettings.toml to an absolute path.",
            program
        )
    }

    /// Get hint for an unreadable backend report
    pub fn backend_report() -> &'static str {
        "The backend must write a JSON report to $BUILDDRIVER_REPORT, e.g.\n\
         {\"result\": \"Succeeded\", \"totalTimeMs\": 1200, \"totalWarnings\": 0, \
         \"totalErrors\": 0, \"totalSize\": 1048576}\n\
         or leave the file empty to have the result derived from its exit status."
    }
}
