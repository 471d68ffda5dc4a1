//! BuildSettings.toml parsing
//!
//! Each project keeps its scene list and the backend command in a
//! `BuildSettings.toml` next to the project:
//!
//! ```toml
//! [[scenes]]
//! path = "Assets/Scenes/Menu.unity"
//!
//! [[scenes]]
//! path = "Assets/Scenes/Debug.unity"
//! enabled = false
//!
//! [backend]
//! program = "unity-batch-build"
//! args = ["--quiet"]
//! working_dir = "."
//!
//! [backend.env]
//! UNITY_LICENSE_SERVER = "http://licenses.internal"
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::error::{hints, DriverError};

/// Default file name looked up in the project path
pub const BUILD_SETTINGS_FILE: &str = "BuildSettings.toml";

/// Root of BuildSettings.toml
#[derive(Debug, Clone, Deserialize)]
pub struct BuildSettingsFile {
    /// Scenes in build order
    #[serde(default)]
    pub scenes: Vec<SceneEntry>,

    /// Command that performs the build
    pub backend: BackendConfig,
}

/// One scene of the build list
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SceneEntry {
    pub path: String,

    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

/// External build program configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BackendConfig {
    /// Program name on PATH or a path to an executable
    pub program: String,

    #[serde(default)]
    pub args: Vec<String>,

    /// Extra environment variables for the program
    #[serde(default)]
    pub env: BTreeMap<String, String>,

    /// Working directory, relative to the project path
    pub working_dir: Option<PathBuf>,
}

impl BuildSettingsFile {
    /// Load the settings for a project
    ///
    /// `override_path` wins over `<project_path>/BuildSettings.toml`.
    pub fn load(project_path: &Path, override_path: Option<&Path>) -> Result<Self> {
        let path = match override_path {
            Some(path) => path.to_path_buf(),
            None => project_path.join(BUILD_SETTINGS_FILE),
        };

        if !path.is_file() {
            return Err(DriverError::settings_error_with_hint(
                format!("{} not found", path.display()),
                None,
                hints::build_settings_not_found(),
            )
            .into());
        }

        Self::load_from_path(&path).map_err(|e| {
            DriverError::settings_error_with_hint(
                format!("failed to load {}", path.display()),
                Some(e),
                hints::invalid_build_settings(),
            )
            .into()
        })
    }

    /// Load settings from a specific path
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read build settings from {}", path.display()))?;

        Self::parse(&content)
    }

    /// Parse settings from TOML string
    pub fn parse(content: &str) -> Result<Self> {
        let settings: Self =
            toml::from_str(content).context("Failed to parse BuildSettings.toml")?;

        if settings.backend.program.trim().is_empty() {
            bail!("backend.program must not be empty");
        }
        if let Some(scene) = settings.scenes.iter().find(|s| s.path.trim().is_empty()) {
            bail!("scene entry has an empty path (enabled = {})", scene.enabled);
        }

        Ok(settings)
    }
}
