//! Exit-codes command implementation

use anyhow::Result;
use clap::Args;

use crate::exit::ExitReason;

/// Print the exit code table for CI scripts
#[derive(Args, Debug)]
pub struct ExitCodesCommand {}

impl ExitCodesCommand {
    /// Execute the exit-codes command
    pub fn execute(self, _verbose: bool) -> Result<ExitReason> {
        println!("code  meaning");
        for reason in ExitReason::ALL {
            println!("{}", reason);
        }
        println!("{:>3}  invalid command-line usage (reported by the argument parser)", 2);
        Ok(ExitReason::Success)
    }
}
