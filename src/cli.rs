//! CLI argument parsing using clap derive macros

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands::{build::BuildCommand, exit_codes::ExitCodesCommand, targets::TargetsCommand};
use crate::exit::ExitReason;

/// builddriver - batch player build driver
///
/// Parses engine-style build flags, runs the project's build backend and
/// exits with a code CI can branch on (see `builddriver exit-codes`).
#[derive(Parser, Debug)]
#[command(name = "builddriver")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output (must precede the subcommand)
    #[arg(short, long)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "BUILDDRIVER_NO_COLOR")]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate flags, run the build backend and report the result
    #[command(disable_help_flag = true, disable_version_flag = true)]
    Build(BuildCommand),

    /// List supported build targets
    Targets(TargetsCommand),

    /// Print the exit code table
    ExitCodes(ExitCodesCommand),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<ExitReason> {
        // Set up terminal colors
        if self.no_color {
            console::set_colors_enabled(false);
            console::set_colors_enabled_stderr(false);
        }

        // Execute the subcommand
        match self.command {
            Commands::Build(cmd) => cmd.execute(self.verbose),
            Commands::Targets(cmd) => cmd.execute(self.verbose),
            Commands::ExitCodes(cmd) => cmd.execute(self.verbose),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_build_keeps_engine_flags_verbatim() {
        let cli = Cli::try_parse_from([
            "builddriver",
            "--no-color",
            "build",
            "--settings",
            "ci/BuildSettings.toml",
            "-projectPath",
            "/p",
            "-batchmode",
            "-buildTarget",
            "Android",
            "-verbose",
        ])
        .unwrap();

        assert!(cli.no_color);
        let Commands::Build(cmd) = cli.command else {
            panic!("expected build command");
        };
        assert_eq!(
            cmd.settings.as_deref(),
            Some(std::path::Path::new("ci/BuildSettings.toml"))
        );
        assert_eq!(
            cmd.flags,
            vec!["-projectPath", "/p", "-batchmode", "-buildTarget", "Android", "-verbose"]
        );
    }

    #[test]
    fn test_build_short_flags_are_engine_flags() {
        let cli = Cli::try_parse_from([
            "builddriver",
            "build",
            "-h",
            "-projectPath",
            "/p",
            "-v",
            "-V",
        ])
        .unwrap();

        assert!(!cli.verbose);
        let Commands::Build(cmd) = cli.command else {
            panic!("expected build command");
        };
        assert_eq!(cmd.flags, vec!["-h", "-projectPath", "/p", "-v", "-V"]);
    }

    #[test]
    fn test_verbose_before_subcommand() {
        let cli = Cli::try_parse_from(["builddriver", "-v", "build", "-projectPath", "/p"]).unwrap();
        assert!(cli.verbose);
    }

    #[test]
    fn test_build_long_help_still_available() {
        let err = Cli::try_parse_from(["builddriver", "build", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }
}
