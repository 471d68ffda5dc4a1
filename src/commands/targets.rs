//! Targets command implementation

use anyhow::Result;
use clap::Args;

use crate::build::BuildTarget;
use crate::exit::ExitReason;

/// List the platform names accepted by -buildTarget
#[derive(Args, Debug)]
pub struct TargetsCommand {}

impl TargetsCommand {
    /// Execute the targets command
    pub fn execute(self, verbose: bool) -> Result<ExitReason> {
        for target in BuildTarget::ALL {
            if verbose && target == BuildTarget::Android {
                println!(
                    "{}  (-androidVersionCode, -androidKeystore*, -androidKeyalias*; .aab output builds an App Bundle)",
                    target
                );
            } else {
                println!("{}", target);
            }
        }
        Ok(ExitReason::Success)
    }
}
