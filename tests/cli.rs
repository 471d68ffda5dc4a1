//! End-to-end tests for the builddriver binary

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn builddriver() -> Command {
    let mut cmd = Command::cargo_bin("builddriver").unwrap();
    cmd.env_remove("BUILDDRIVER_SETTINGS")
        .env_remove("BUILDDRIVER_NO_COLOR");
    cmd
}

/// Project whose backend is a shell script
fn project_with_backend(script: &str) -> TempDir {
    let project = tempfile::tempdir().unwrap();
    let settings = format!(
        r#"
[[scenes]]
path = "Assets/Scenes/Menu.unity"

[[scenes]]
path = "Assets/Scenes/Sandbox.unity"
enabled = false

[[scenes]]
path = "Assets/Scenes/Level1.unity"

[backend]
program = "sh"
args = ["-c", {script}]
"#,
        script = toml_string(script)
    );
    std::fs::write(project.path().join("BuildSettings.toml"), settings).unwrap();
    project
}

fn toml_string(value: &str) -> String {
    format!("'''{}'''", value)
}

fn path_arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

const MARK_INVOKED: &str = "touch backend-invoked";

#[test]
fn exit_codes_table_lists_every_code() {
    builddriver()
        .arg("exit-codes")
        .assert()
        .success()
        .stdout(predicate::str::contains("110  missing -projectPath"))
        .stdout(predicate::str::contains("121  invalid -buildTarget"))
        .stdout(predicate::str::contains("131  invalid -androidVersionCode"))
        .stdout(predicate::str::contains("103  build result unknown"));
}

#[test]
fn targets_lists_exact_names() {
    builddriver()
        .arg("targets")
        .assert()
        .success()
        .stdout(predicate::str::contains("Android\n"))
        .stdout(predicate::str::contains("StandaloneOSX\n"))
        .stdout(predicate::str::contains("iOS\n"));
}

#[test]
fn no_flags_exits_missing_project_path() {
    builddriver()
        .arg("build")
        .assert()
        .code(110)
        .stdout(predicate::str::contains("#    Parsing settings     #"))
        .stderr(predicate::str::contains("Missing argument -projectPath"));
}

#[test]
fn invalid_target_exits_121() {
    builddriver()
        .args(["build", "-projectPath", ".", "-buildTarget", "InvalidPlatform"])
        .assert()
        .code(121)
        .stderr(predicate::str::contains("Supported targets"));
}

#[test]
fn missing_output_path_exits_130() {
    builddriver()
        .args(["build", "-projectPath", ".", "-buildTarget", "Android"])
        .assert()
        .code(130);
}

#[test]
fn missing_settings_file_exits_1() {
    let project = tempfile::tempdir().unwrap();
    builddriver()
        .args([
            "build",
            "-projectPath",
            path_arg(project.path()),
            "-buildTarget",
            "WebGL",
            "-buildPath",
            "out",
        ])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("BuildSettings.toml"));
}

#[test]
fn leading_short_help_is_an_engine_flag() {
    builddriver()
        .args(["build", "-h", "-projectPath", ".", "-buildTarget", "Nope"])
        .assert()
        .code(121)
        .stdout(predicate::str::contains("Found flag \"h\" with value \"\"."));
}

#[test]
fn leading_short_verbose_is_an_engine_flag() {
    builddriver()
        .args(["build", "-v", "-projectPath", ".", "-buildTarget", "Nope"])
        .assert()
        .code(121)
        .stdout(predicate::str::contains("Found flag \"v\" with value \"\"."));
}

#[test]
fn duplicate_secret_flag_warns_without_values() {
    builddriver()
        .args([
            "build",
            "-androidKeystorePass",
            "s1",
            "-androidKeystorePass",
            "s2",
        ])
        .assert()
        .code(110)
        .stderr(predicate::str::contains(
            "flag \"androidKeystorePass\" given more than once",
        ))
        .stdout(predicate::str::contains("s1").not())
        .stdout(predicate::str::contains("s2").not())
        .stderr(predicate::str::contains("s1").not())
        .stderr(predicate::str::contains("s2").not());
}

#[cfg(unix)]
mod with_shell_backend {
    use super::*;

    #[test]
    fn missing_build_target_never_invokes_backend() {
        let project = project_with_backend(MARK_INVOKED);

        builddriver()
            .args([
                "build",
                "-projectPath",
                path_arg(project.path()),
                "-buildPath",
                "out/app.aab",
            ])
            .assert()
            .code(120);

        assert!(!project.path().join("backend-invoked").exists());
    }

    #[test]
    fn invalid_version_code_never_invokes_backend() {
        let project = project_with_backend(MARK_INVOKED);

        builddriver()
            .args([
                "build",
                "-projectPath",
                path_arg(project.path()),
                "-buildTarget",
                "Android",
                "-buildPath",
                "out/app.aab",
                "-androidVersionCode",
                "forty-two",
            ])
            .assert()
            .code(131)
            .stderr(predicate::str::contains("forty-two"));

        assert!(!project.path().join("backend-invoked").exists());
    }

    #[test]
    fn android_app_bundle_build_succeeds_and_hides_secrets() {
        let project = project_with_backend(
            r#"cp "$BUILDDRIVER_REQUEST" request.json && printf '{"result":"Succeeded","totalTimeMs":61500,"totalWarnings":3,"totalErrors":0,"totalSize":4096}' > "$BUILDDRIVER_REPORT""#,
        );

        builddriver()
            .args([
                "build",
                "-batchmode",
                "-projectPath",
                path_arg(project.path()),
                "-buildTarget",
                "Android",
                "-buildPath",
                "out/app.aab",
                "-buildVersion",
                "1.2.0",
                "-androidVersionCode",
                "42",
                "-androidKeystoreName",
                "user.keystore",
                "-androidKeystorePass",
                "store-secret",
                "-androidKeyaliasName",
                "alias-secret",
                "-androidKeyaliasPass",
                "pass-secret",
            ])
            .assert()
            .code(0)
            .stdout(predicate::str::contains(
                "Found flag \"androidKeystoreName\" with value \"user.keystore\".",
            ))
            .stdout(predicate::str::contains(
                "Found flag \"androidKeystorePass\" with value *HIDDEN*.",
            ))
            .stdout(predicate::str::contains("secret").not())
            .stderr(predicate::str::contains("secret").not())
            .stdout(predicate::str::contains("Duration: 00:01:01.500"))
            .stdout(predicate::str::contains("Warnings: 3"))
            .stdout(predicate::str::contains("Size: 4096 bytes"))
            .stdout(predicate::str::contains("Build succeeded!"));

        let request: serde_json::Value = serde_json::from_str(
            &std::fs::read_to_string(project.path().join("request.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(request["target"], "Android");
        assert_eq!(request["locationPathName"], "out/app.aab");
        assert_eq!(
            request["scenes"],
            serde_json::json!(["Assets/Scenes/Menu.unity", "Assets/Scenes/Level1.unity"])
        );
        assert_eq!(request["settings"]["bundleVersion"], "1.2.0");
        assert_eq!(request["settings"]["android"]["bundleVersionCode"], 42);
        assert_eq!(request["settings"]["android"]["buildAppBundle"], true);
        assert_eq!(request["settings"]["android"]["keyaliasPass"], "pass-secret");
    }

    #[test]
    fn android_build_without_versions_warns_and_keeps_defaults() {
        let project = project_with_backend(r#"cp "$BUILDDRIVER_REQUEST" request.json"#);

        builddriver()
            .args([
                "build",
                "-projectPath",
                path_arg(project.path()),
                "-buildTarget",
                "Android",
                "-buildPath",
                "out/app.apk",
            ])
            .assert()
            .code(0)
            .stderr(predicate::str::contains("no -buildVersion given"))
            .stderr(predicate::str::contains("no -androidVersionCode given"));

        let request: serde_json::Value = serde_json::from_str(
            &std::fs::read_to_string(project.path().join("request.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(request["settings"]["android"]["buildAppBundle"], false);
        assert!(request["settings"].get("bundleVersion").is_none());
        assert!(request["settings"]["android"].get("bundleVersionCode").is_none());
    }

    #[test]
    fn failing_backend_without_report_exits_101() {
        let project = project_with_backend("exit 7");

        builddriver()
            .args([
                "build",
                "-projectPath",
                path_arg(project.path()),
                "-buildTarget",
                "StandaloneLinux64",
                "-customBuildPath",
                "out/game",
            ])
            .assert()
            .code(101)
            .stdout(predicate::str::contains("Errors: 0"))
            .stderr(predicate::str::contains("Build failed!"));
    }

    #[test]
    fn unrecognized_report_result_exits_103() {
        let project = project_with_backend(
            r#"printf '{"result":"Interrupted"}' > "$BUILDDRIVER_REPORT""#,
        );

        builddriver()
            .args([
                "build",
                "-projectPath",
                path_arg(project.path()),
                "-buildTarget",
                "iOS",
                "-buildPath",
                "out/xcode",
            ])
            .assert()
            .code(103)
            .stderr(predicate::str::contains("Build result is unknown!"));
    }

    #[test]
    fn settings_override_is_used() {
        let project = project_with_backend("exit 1");
        let ci_settings = project.path().join("ci.toml");
        std::fs::write(
            &ci_settings,
            "[backend]\nprogram = \"sh\"\nargs = [\"-c\", \"exit 0\"]\n",
        )
        .unwrap();

        builddriver()
            .args([
                "build",
                "--settings",
                path_arg(&ci_settings),
                "-projectPath",
                path_arg(project.path()),
                "-buildTarget",
                "WebGL",
                "-buildPath",
                "out/web",
            ])
            .assert()
            .code(0);
    }
}
