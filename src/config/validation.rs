//! Command-line option validation
//!
//! Rules run in a fixed order and the first violation stops the build with
//! its own exit code, so CI can tell the failures apart.

use anyhow::Result;

use crate::args::OptionMap;
use crate::build::BuildTarget;
use crate::error::DriverError;
use crate::exit::ExitReason;

/// Validate options, applying the `buildPath` alias
///
/// 1. `projectPath` must be present
/// 2. `buildTarget` must be present
/// 3. `buildTarget` must be a supported platform name
/// 4. `buildPath` fills in a missing `customBuildPath`
/// 5. `customBuildPath` must be present and non-empty
pub fn validate_options(mut options: OptionMap) -> Result<OptionMap> {
    if !options.contains("projectPath") {
        return Err(
            DriverError::missing_argument("projectPath", ExitReason::MissingProjectPath).into(),
        );
    }

    let Some(build_target) = options.get("buildTarget") else {
        return Err(
            DriverError::missing_argument("buildTarget", ExitReason::MissingBuildTarget).into(),
        );
    };
    build_target.parse::<BuildTarget>()?;

    apply_build_path_alias(&mut options);

    if options.get_non_empty("customBuildPath").is_none() {
        return Err(DriverError::missing_argument(
            "customBuildPath",
            ExitReason::MissingCustomBuildPath,
        )
        .into());
    }

    Ok(options)
}

/// Copy `buildPath` into `customBuildPath` unless the latter was given
fn apply_build_path_alias(options: &mut OptionMap) {
    if options.contains("customBuildPath") {
        return;
    }
    if let Some(build_path) = options.get("buildPath").map(str::to_string) {
        options.insert("customBuildPath", build_path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(pairs: &[(&str, &str)]) -> OptionMap {
        pairs.iter().copied().collect()
    }

    fn failure(pairs: &[(&str, &str)]) -> ExitReason {
        let err = validate_options(options(pairs)).unwrap_err();
        err.downcast_ref::<DriverError>()
            .expect("validation errors are DriverErrors")
            .exit_reason()
    }

    #[test]
    fn test_missing_project_path_reported_first() {
        assert_eq!(failure(&[]), ExitReason::MissingProjectPath);
        assert_eq!(
            failure(&[("buildTarget", "InvalidPlatform")]),
            ExitReason::MissingProjectPath
        );
    }

    #[test]
    fn test_missing_build_target() {
        assert_eq!(
            failure(&[("projectPath", "/p"), ("buildPath", "out")]),
            ExitReason::MissingBuildTarget
        );
    }

    #[test]
    fn test_invalid_build_target() {
        assert_eq!(
            failure(&[("projectPath", "/p"), ("buildTarget", "InvalidPlatform")]),
            ExitReason::InvalidBuildTarget
        );
        assert_eq!(
            failure(&[("projectPath", "/p"), ("buildTarget", "android"), ("buildPath", "o")]),
            ExitReason::InvalidBuildTarget
        );
        assert_eq!(
            failure(&[("projectPath", "/p"), ("buildTarget", "")]),
            ExitReason::InvalidBuildTarget
        );
    }

    #[test]
    fn test_missing_custom_build_path() {
        assert_eq!(
            failure(&[("projectPath", "/p"), ("buildTarget", "Android")]),
            ExitReason::MissingCustomBuildPath
        );
        assert_eq!(
            failure(&[
                ("projectPath", "/p"),
                ("buildTarget", "Android"),
                ("customBuildPath", "")
            ]),
            ExitReason::MissingCustomBuildPath
        );
    }

    #[test]
    fn test_build_path_alias() {
        let validated = validate_options(options(&[
            ("projectPath", "/p"),
            ("buildTarget", "WebGL"),
            ("buildPath", "out/web"),
        ]))
        .unwrap();
        assert_eq!(validated.get("customBuildPath"), Some("out/web"));
        assert_eq!(validated.get("buildPath"), Some("out/web"));
    }

    #[test]
    fn test_custom_build_path_wins_over_alias() {
        let validated = validate_options(options(&[
            ("projectPath", "/p"),
            ("buildTarget", "iOS"),
            ("buildPath", "out/alias"),
            ("customBuildPath", "out/explicit"),
        ]))
        .unwrap();
        assert_eq!(validated.get("customBuildPath"), Some("out/explicit"));
    }
}
