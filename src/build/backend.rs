//! Backend that runs an external build program
//!
//! The program gets the [`BuildRequest`] as a JSON file and may write a JSON
//! [`BuildOutcome`] report back. Without a report the outcome is derived from
//! its exit status.
//!
//! Environment passed to the program:
//!
//! - `BUILDDRIVER_REQUEST` - path of the request JSON
//! - `BUILDDRIVER_REPORT` - path where the report JSON may be written
//! - `BUILDDRIVER_TARGET` - build target name
//! - `BUILDDRIVER_OUTPUT` - output path

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use walkdir::WalkDir;

use super::{BuildBackend, BuildOutcome, BuildRequest, BuildStatus};
use crate::config::build_settings::BackendConfig;
use crate::error::{hints, DriverError};
use crate::exec::subprocess::{resolve_program, run_command, CommandResult, CommandSpec};

pub const REQUEST_ENV: &str = "BUILDDRIVER_REQUEST";
pub const REPORT_ENV: &str = "BUILDDRIVER_REPORT";
pub const TARGET_ENV: &str = "BUILDDRIVER_TARGET";
pub const OUTPUT_ENV: &str = "BUILDDRIVER_OUTPUT";

/// Runs the configured program once per build
#[derive(Debug, Clone)]
pub struct CommandBackend {
    name: String,
    spec: CommandSpec,
}

impl CommandBackend {
    /// Create a backend from BuildSettings.toml, resolving paths against the project
    pub fn from_config(config: &BackendConfig, project_path: &Path) -> Self {
        let program = PathBuf::from(&config.program);
        let program = if program.is_relative() && program.components().count() > 1 {
            project_path.join(program)
        } else {
            program
        };

        let working_dir = match &config.working_dir {
            Some(dir) => project_path.join(dir),
            None => project_path.to_path_buf(),
        };

        Self {
            name: config.program.clone(),
            spec: CommandSpec {
                program,
                args: config.args.clone(),
                env: config.env.clone(),
                working_dir: Some(working_dir),
            },
        }
    }

    /// Directory the program runs in; relative output paths resolve against it
    pub fn working_dir(&self) -> Option<&Path> {
        self.spec.working_dir.as_deref()
    }

    /// Program as it will be launched
    pub fn program(&self) -> &Path {
        &self.spec.program
    }

    fn output_location(&self, output_path: &str) -> PathBuf {
        match self.working_dir() {
            Some(dir) => dir.join(output_path),
            None => PathBuf::from(output_path),
        }
    }
}

impl BuildBackend for CommandBackend {
    fn backend_name(&self) -> &str {
        &self.name
    }

    fn validate_prerequisites(&self) -> Result<()> {
        if resolve_program(&self.spec.program).is_none() {
            return Err(DriverError::missing_tool(
                self.name.clone(),
                "running the build backend",
                hints::backend_program(&self.name),
            )
            .into());
        }
        Ok(())
    }

    fn build(&self, request: &BuildRequest) -> Result<BuildOutcome> {
        let exchange = tempfile::tempdir().context("Failed to create backend exchange directory")?;
        let request_path = exchange.path().join("request.json");
        let report_path = exchange.path().join("report.json");

        let payload = serde_json::to_vec_pretty(request).context("Failed to encode build request")?;
        std::fs::write(&request_path, payload)
            .with_context(|| format!("Failed to write {}", request_path.display()))?;

        let mut spec = self.spec.clone();
        spec.env.insert(REQUEST_ENV.into(), request_path.display().to_string());
        spec.env.insert(REPORT_ENV.into(), report_path.display().to_string());
        spec.env.insert(TARGET_ENV.into(), request.target.name().into());
        spec.env.insert(OUTPUT_ENV.into(), request.location_path_name.clone());

        let result = run_command(&spec).map_err(|e| {
            DriverError::backend_error_with_hint(
                format!("could not launch '{}'", self.name),
                Some(e),
                hints::backend_program(&self.name),
            )
        })?;

        match read_report(&report_path)? {
            Some(outcome) => Ok(outcome),
            None => Ok(outcome_from_exit(
                &result,
                &self.output_location(&request.location_path_name),
            )),
        }
    }
}

/// Read the backend's report, `None` if it wrote nothing
pub fn read_report(path: &Path) -> Result<Option<BuildOutcome>> {
    if !path.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read build report {}", path.display()))?;
    if content.trim().is_empty() {
        return Ok(None);
    }

    let outcome = serde_json::from_str(&content).map_err(|e| {
        DriverError::backend_error_with_hint(
            "build report is not valid JSON",
            Some(e.into()),
            hints::backend_report(),
        )
    })?;
    Ok(Some(outcome))
}

/// Outcome for a backend that exited without writing a report
pub fn outcome_from_exit(result: &CommandResult, output: &Path) -> BuildOutcome {
    let status = match (result.success, result.exit_code) {
        (true, _) => BuildStatus::Succeeded,
        (false, Some(_)) => BuildStatus::Failed,
        (false, None) => BuildStatus::Cancelled,
    };

    BuildOutcome {
        status,
        duration: result.duration,
        total_warnings: 0,
        total_errors: 0,
        total_size: output_size(output),
    }
}

/// Size in bytes of a file, or of all files under a directory
pub fn output_size(path: &Path) -> u64 {
    WalkDir::new(path)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| entry.metadata().ok())
        .map(|metadata| metadata.len())
        .sum()
}
