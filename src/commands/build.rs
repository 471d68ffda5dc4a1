//! Build command implementation

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;

use crate::args::parse_arguments;
use crate::build::backend::CommandBackend;
use crate::build::report::report;
use crate::build::settings::PlayerSettingsStore;
use crate::build::{enabled_scenes, invoke_build, BuildBackend};
use crate::config::{validate_options, BuildSettingsFile};
use crate::exit::ExitReason;
use crate::utils::terminal::print_info;

/// Build a player from engine-style flags
///
/// Example:
///
///   builddriver build -projectPath . -buildTarget Android -buildPath out/app.aab
///     -buildVersion 1.2.0 -androidVersionCode 42
#[derive(Args, Debug)]
pub struct BuildCommand {
    /// Build settings file (defaults to <projectPath>/BuildSettings.toml)
    #[arg(long, env = "BUILDDRIVER_SETTINGS")]
    pub settings: Option<PathBuf>,

    /// Print help (long form only, single-dash tokens belong to FLAGS)
    #[arg(long, action = clap::ArgAction::Help)]
    pub help: Option<bool>,

    /// Engine-style flags: -projectPath, -buildTarget, -buildPath/-customBuildPath,
    /// -buildVersion, -androidVersionCode, -androidKeystoreName, -androidKeystorePass,
    /// -androidKeyaliasName, -androidKeyaliasPass. Other flags are logged and ignored.
    #[arg(
        value_name = "FLAGS",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub flags: Vec<String>,
}

impl BuildCommand {
    /// Execute the build command
    pub fn execute(self, verbose: bool) -> Result<ExitReason> {
        let options = validate_options(parse_arguments(&self.flags))?;

        if verbose {
            print_info(&format!("{} flags accepted", options.len()));
        }

        let project_path = match options.get_non_empty("projectPath") {
            Some(path) => PathBuf::from(path),
            None => PathBuf::from("."),
        };

        let build_settings = BuildSettingsFile::load(&project_path, self.settings.as_deref())?;
        let backend = CommandBackend::from_config(&build_settings.backend, &project_path);

        if verbose {
            Self::print_plan(&project_path, &backend, &build_settings);
        }

        let mut player_settings = PlayerSettingsStore::new();
        let outcome = invoke_build(
            &options,
            &build_settings.scenes,
            &mut player_settings,
            &backend,
        )?;

        Ok(report(&outcome))
    }

    fn print_plan(project_path: &Path, backend: &CommandBackend, settings: &BuildSettingsFile) {
        print_info(&format!("project: {}", project_path.display()));
        print_info(&format!(
            "backend: {} ({})",
            backend.backend_name(),
            backend.program().display()
        ));
        if let Some(dir) = backend.working_dir() {
            print_info(&format!("working directory: {}", dir.display()));
        }
        print_info(&format!(
            "scenes: {} enabled of {}",
            enabled_scenes(&settings.scenes).len(),
            settings.scenes.len()
        ));
    }
}
