//! builddriver - a command-line build driver for batch player builds
//!
//! Engine-style flags are parsed, validated and handed to the project's build
//! backend; the backend's result becomes the process exit code.
//!
//! ## Architecture
//!
//! ```text
//! args.rs → config/validation.rs → build/mod.rs → build/backend.rs → build/report.rs
//! ```

mod args;
mod build;
mod cli;
mod commands;
mod config;
mod error;
mod exec;
mod exit;
mod utils;

use std::process::ExitCode;

use clap::Parser;

use cli::Cli;
use error::DriverError;
use exit::ExitReason;
use utils::terminal::print_error;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let reason = match cli.execute() {
        Ok(reason) => reason,
        Err(err) => match err.downcast_ref::<DriverError>() {
            Some(driver_error) => {
                driver_error.display_with_hints();
                driver_error.exit_reason()
            }
            None => {
                print_error(&format!("{:#}", err));
                ExitReason::DriverError
            }
        },
    };

    reason.into()
}
