//! Build invocation
//!
//! Turns a validated [`OptionMap`] into a [`BuildConfiguration`], writes it
//! into the [`PlayerSettingsStore`], and hands a [`BuildRequest`] to a
//! [`BuildBackend`]. The backend's [`BuildOutcome`] is returned unchanged.
//!
//! ## Modules
//!
//! - `platforms` - Platform-specific options (Android version code, signing)
//! - `settings` - Settings store passed to the backend
//! - `backend` - Backend that runs an external build program
//! - `report` - Outcome summary and exit code mapping

pub mod backend;
pub mod platforms;
pub mod report;
pub mod settings;

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::args::OptionMap;
use crate::config::build_settings::SceneEntry;
use crate::error::DriverError;
use crate::exit::ExitReason;
use crate::utils::terminal::print_warning;

use platforms::{platform_config, PlatformConfig};
use settings::{PlayerSettings, PlayerSettingsStore};

/// Platforms the driver can build for
///
/// Names match the host's build target identifiers exactly (case-sensitive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuildTarget {
    StandaloneOsx,
    StandaloneWindows,
    StandaloneWindows64,
    StandaloneLinux64,
    Ios,
    Android,
    WebGl,
    WsaPlayer,
    Ps4,
    Ps5,
    XboxOne,
    Tvos,
    Switch,
    LinuxHeadlessSimulation,
    GameCoreXboxSeries,
    GameCoreXboxOne,
    EmbeddedLinux,
    Qnx,
    VisionOs,
}

impl BuildTarget {
    pub const ALL: [BuildTarget; 19] = [
        BuildTarget::StandaloneOsx,
        BuildTarget::StandaloneWindows,
        BuildTarget::StandaloneWindows64,
        BuildTarget::StandaloneLinux64,
        BuildTarget::Ios,
        BuildTarget::Android,
        BuildTarget::WebGl,
        BuildTarget::WsaPlayer,
        BuildTarget::Ps4,
        BuildTarget::Ps5,
        BuildTarget::XboxOne,
        BuildTarget::Tvos,
        BuildTarget::Switch,
        BuildTarget::LinuxHeadlessSimulation,
        BuildTarget::GameCoreXboxSeries,
        BuildTarget::GameCoreXboxOne,
        BuildTarget::EmbeddedLinux,
        BuildTarget::Qnx,
        BuildTarget::VisionOs,
    ];

    /// Name as accepted by `-buildTarget`
    pub fn name(self) -> &'static str {
        match self {
            BuildTarget::StandaloneOsx => "StandaloneOSX",
            BuildTarget::StandaloneWindows => "StandaloneWindows",
            BuildTarget::StandaloneWindows64 => "StandaloneWindows64",
            BuildTarget::StandaloneLinux64 => "StandaloneLinux64",
            BuildTarget::Ios => "iOS",
            BuildTarget::Android => "Android",
            BuildTarget::WebGl => "WebGL",
            BuildTarget::WsaPlayer => "WSAPlayer",
            BuildTarget::Ps4 => "PS4",
            BuildTarget::Ps5 => "PS5",
            BuildTarget::XboxOne => "XboxOne",
            BuildTarget::Tvos => "tvOS",
            BuildTarget::Switch => "Switch",
            BuildTarget::LinuxHeadlessSimulation => "LinuxHeadlessSimulation",
            BuildTarget::GameCoreXboxSeries => "GameCoreXboxSeries",
            BuildTarget::GameCoreXboxOne => "GameCoreXboxOne",
            BuildTarget::EmbeddedLinux => "EmbeddedLinux",
            BuildTarget::Qnx => "QNX",
            BuildTarget::VisionOs => "VisionOS",
        }
    }
}

impl fmt::Display for BuildTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BuildTarget {
    type Err = DriverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BuildTarget::ALL
            .into_iter()
            .find(|target| target.name() == s)
            .ok_or_else(|| DriverError::InvalidBuildTarget {
                value: s.to_string(),
            })
    }
}

impl Serialize for BuildTarget {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// Everything the invoker derives from the validated options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfiguration {
    pub target: BuildTarget,
    /// Never empty
    pub output_path: String,
    /// `-buildVersion`, verbatim
    pub version: Option<String>,
    pub platform: Option<PlatformConfig>,
}

impl BuildConfiguration {
    /// Derive the configuration from validated options
    pub fn from_options(options: &OptionMap) -> Result<Self> {
        let target: BuildTarget = options
            .get("buildTarget")
            .ok_or_else(|| DriverError::missing_argument("buildTarget", ExitReason::MissingBuildTarget))?
            .parse()?;

        let output_path = options
            .get_non_empty("customBuildPath")
            .ok_or_else(|| {
                DriverError::missing_argument("customBuildPath", ExitReason::MissingCustomBuildPath)
            })?
            .to_string();

        let version = options.get("buildVersion").map(str::to_string);
        let platform = platform_config(target, options, &output_path)?;

        Ok(Self {
            target,
            output_path,
            version,
            platform,
        })
    }

    /// Android options, when building for Android
    pub fn android(&self) -> Option<&platforms::AndroidConfig> {
        match &self.platform {
            Some(PlatformConfig::Android(android)) => Some(android),
            None => None,
        }
    }

    /// Write version and platform options into the settings store
    pub fn apply_to(&self, settings: &mut impl PlayerSettings) {
        if let Some(version) = &self.version {
            settings.set_bundle_version(version);
        }
        if let Some(platform) = &self.platform {
            platform.apply(settings);
        }
    }
}

/// What the backend is asked to build
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildRequest {
    /// Enabled scene paths, in build settings order
    pub scenes: Vec<String>,
    pub target: BuildTarget,
    pub location_path_name: String,
    pub settings: PlayerSettingsStore,
}

/// Terminal status reported by the backend
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
pub enum BuildStatus {
    Succeeded,
    Failed,
    Cancelled,
    #[default]
    #[serde(other)]
    Unknown,
}

/// Structured result of one backend build
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildOutcome {
    #[serde(rename = "result", default)]
    pub status: BuildStatus,
    #[serde(rename = "totalTimeMs", default, deserialize_with = "duration_from_millis")]
    pub duration: Duration,
    #[serde(default)]
    pub total_warnings: u64,
    #[serde(default)]
    pub total_errors: u64,
    /// Output size in bytes
    #[serde(default)]
    pub total_size: u64,
}

fn duration_from_millis<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
    u64::deserialize(deserializer).map(Duration::from_millis)
}

/// Trait for build backends
pub trait BuildBackend {
    /// Get the backend name for diagnostics
    fn backend_name(&self) -> &str;

    /// Check the backend can run before any build starts
    fn validate_prerequisites(&self) -> Result<()>;

    /// Run the build to completion
    fn build(&self, request: &BuildRequest) -> Result<BuildOutcome>;
}

/// Paths of enabled scenes, order preserved
pub fn enabled_scenes(scenes: &[SceneEntry]) -> Vec<String> {
    scenes
        .iter()
        .filter(|scene| scene.enabled)
        .map(|scene| scene.path.clone())
        .collect()
}

/// Configure and run one build
///
/// `settings` holds the project's current values; flags that are absent or
/// empty leave them untouched.
pub fn invoke_build(
    options: &OptionMap,
    scenes: &[SceneEntry],
    settings: &mut PlayerSettingsStore,
    backend: &dyn BuildBackend,
) -> Result<BuildOutcome> {
    let config = BuildConfiguration::from_options(options)?;

    if config.version.is_none() {
        print_warning("no -buildVersion given, keeping the project's bundle version");
    }
    if config.android().is_some_and(|android| android.version_code.is_none()) {
        print_warning("no -androidVersionCode given, keeping the project's version code");
    }
    config.apply_to(settings);

    let scenes = enabled_scenes(scenes);
    if scenes.is_empty() {
        print_warning("no enabled scenes in build settings");
    }

    let request = BuildRequest {
        scenes,
        target: config.target,
        location_path_name: config.output_path,
        settings: settings.clone(),
    };

    backend.validate_prerequisites()?;
    backend.build(&request)
}
