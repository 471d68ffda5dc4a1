//! Android build options
//!
//! Android builds carry an integer version code, an APK/AAB switch derived
//! from the output path, and optional keystore credentials.

use std::fmt;
use std::num::NonZeroU32;

use anyhow::Result;

use crate::args::OptionMap;
use crate::build::settings::{redact, PlayerSettings};
use crate::error::DriverError;

/// Extension that selects an Android App Bundle over an APK
pub const APP_BUNDLE_EXTENSION: &str = ".aab";

/// Keystore credentials, each applied only when given a non-empty value
#[derive(Clone, Default, PartialEq, Eq)]
pub struct AndroidSigning {
    pub keystore_name: Option<String>,
    pub keystore_pass: Option<String>,
    pub keyalias_name: Option<String>,
    pub keyalias_pass: Option<String>,
}

impl fmt::Debug for AndroidSigning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AndroidSigning")
            .field("keystore_name", &self.keystore_name)
            .field("keystore_pass", &redact(&self.keystore_pass))
            .field("keyalias_name", &redact(&self.keyalias_name))
            .field("keyalias_pass", &redact(&self.keyalias_pass))
            .finish()
    }
}

impl AndroidSigning {
    fn from_options(options: &OptionMap) -> Self {
        let owned = |name: &str| options.get_non_empty(name).map(str::to_string);
        Self {
            keystore_name: owned("androidKeystoreName"),
            keystore_pass: owned("androidKeystorePass"),
            keyalias_name: owned("androidKeyaliasName"),
            keyalias_pass: owned("androidKeyaliasPass"),
        }
    }
}

/// Android part of a build configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AndroidConfig {
    /// `None` leaves the project's current version code in place
    pub version_code: Option<NonZeroU32>,
    pub app_bundle: bool,
    pub signing: AndroidSigning,
}

impl AndroidConfig {
    /// Read Android options for a build writing to `output_path`
    pub fn from_options(options: &OptionMap, output_path: &str) -> Result<Self> {
        let version_code = match options.get("androidVersionCode") {
            Some(raw) => Some(parse_version_code(raw)?),
            None => None,
        };

        Ok(Self {
            version_code,
            app_bundle: is_app_bundle_path(output_path),
            signing: AndroidSigning::from_options(options),
        })
    }

    /// Write these options into the settings store
    pub fn apply(&self, settings: &mut impl PlayerSettings) {
        if let Some(code) = self.version_code {
            settings.set_android_version_code(code.get());
        }
        settings.set_build_app_bundle(self.app_bundle);

        let signing = &self.signing;
        if let Some(name) = &signing.keystore_name {
            settings.set_android_keystore_name(name);
        }
        if let Some(pass) = &signing.keystore_pass {
            settings.set_android_keystore_pass(pass);
        }
        if let Some(name) = &signing.keyalias_name {
            settings.set_android_keyalias_name(name);
        }
        if let Some(pass) = &signing.keyalias_pass {
            settings.set_android_keyalias_pass(pass);
        }
    }
}

/// Parse `-androidVersionCode`, rejecting empty, negative, zero and non-numeric values
fn parse_version_code(raw: &str) -> Result<NonZeroU32> {
    raw.parse::<NonZeroU32>().map_err(|source| {
        DriverError::InvalidVersionCode {
            value: raw.to_string(),
            source,
        }
        .into()
    })
}

/// Whether the output path names an Android App Bundle
pub fn is_app_bundle_path(output_path: &str) -> bool {
    output_path.ends_with(APP_BUNDLE_EXTENSION)
}
