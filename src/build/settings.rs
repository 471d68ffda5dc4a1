//! Player settings store handed to the build backend
//!
//! Instead of mutating engine-global state, the invoker writes version and
//! signing values into a [`PlayerSettingsStore`] through the
//! [`PlayerSettings`] capability, and the backend receives the store.

use std::fmt;

use serde::Serialize;

use crate::args::REDACTED;

/// Setters the invoker is allowed to call on a settings store
pub trait PlayerSettings {
    /// Set the user-facing bundle version (passed through verbatim)
    fn set_bundle_version(&mut self, version: &str);

    /// Set the Android integer version code
    fn set_android_version_code(&mut self, code: u32);

    /// Produce an Android App Bundle instead of an APK
    fn set_build_app_bundle(&mut self, enabled: bool);

    fn set_android_keystore_name(&mut self, name: &str);

    fn set_android_keystore_pass(&mut self, pass: &str);

    fn set_android_keyalias_name(&mut self, name: &str);

    fn set_android_keyalias_pass(&mut self, pass: &str);
}

/// Android-specific settings
#[derive(Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AndroidPlayerSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bundle_version_code: Option<u32>,
    pub build_app_bundle: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keystore_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keystore_pass: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyalias_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyalias_pass: Option<String>,
}

impl fmt::Debug for AndroidPlayerSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AndroidPlayerSettings")
            .field("bundle_version_code", &self.bundle_version_code)
            .field("build_app_bundle", &self.build_app_bundle)
            .field("keystore_name", &self.keystore_name)
            .field("keystore_pass", &redact(&self.keystore_pass))
            .field("keyalias_name", &redact(&self.keyalias_name))
            .field("keyalias_pass", &redact(&self.keyalias_pass))
            .finish()
    }
}

/// Settings store for one build invocation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSettingsStore {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bundle_version: Option<String>,
    pub android: AndroidPlayerSettings,
}

impl PlayerSettingsStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PlayerSettings for PlayerSettingsStore {
    fn set_bundle_version(&mut self, version: &str) {
        self.bundle_version = Some(version.to_string());
    }

    fn set_android_version_code(&mut self, code: u32) {
        self.android.bundle_version_code = Some(code);
    }

    fn set_build_app_bundle(&mut self, enabled: bool) {
        self.android.build_app_bundle = enabled;
    }

    fn set_android_keystore_name(&mut self, name: &str) {
        self.android.keystore_name = Some(name.to_string());
    }

    fn set_android_keystore_pass(&mut self, pass: &str) {
        self.android.keystore_pass = Some(pass.to_string());
    }

    fn set_android_keyalias_name(&mut self, name: &str) {
        self.android.keyalias_name = Some(name.to_string());
    }

    fn set_android_keyalias_pass(&mut self, pass: &str) {
        self.android.keyalias_pass = Some(pass.to_string());
    }
}

/// Debug stand-in for an optional secret
pub(crate) fn redact(value: &Option<String>) -> Option<&'static str> {
    value.as_ref().map(|_| REDACTED)
}
