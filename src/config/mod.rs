//! Project build settings and command-line option validation

pub mod build_settings;
pub mod validation;

pub use build_settings::BuildSettingsFile;
pub use validation::validate_options;
