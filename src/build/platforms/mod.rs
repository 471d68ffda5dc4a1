//! Platform-specific build options
//!
//! Only some targets carry extra options on top of version and output path.
//! Each such platform has its own module that reads its flags from the
//! [`OptionMap`] and applies them to the settings store.

pub mod android;

use anyhow::Result;

use super::settings::PlayerSettings;
use super::BuildTarget;
use crate::args::OptionMap;

pub use android::AndroidConfig;

/// Extra configuration for targets that need it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformConfig {
    Android(AndroidConfig),
}

impl PlatformConfig {
    /// Apply the platform options to the settings store
    pub fn apply(&self, settings: &mut impl PlayerSettings) {
        match self {
            PlatformConfig::Android(android) => android.apply(settings),
        }
    }
}

/// Get the platform configuration for the target, if it has one
pub fn platform_config(
    target: BuildTarget,
    options: &OptionMap,
    output_path: &str,
) -> Result<Option<PlatformConfig>> {
    match target {
        BuildTarget::Android => Ok(Some(PlatformConfig::Android(
            AndroidConfig::from_options(options, output_path)?,
        ))),
        _ => Ok(None),
    }
}
