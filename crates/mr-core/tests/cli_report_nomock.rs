//! CLI end-to-end tests: argument handling, payloads and exit codes.

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use mr_core::exit_codes::ExitCode;
use predicates::prelude::*;
use serde_json::Value;
use std::time::Duration;
use tempfile::TempDir;

/// Command isolated from the user's config and log settings.
fn mr_core(home: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("mr-core");
    cmd.timeout(Duration::from_secs(120))
        .env("XDG_CONFIG_HOME", home.path())
        .env_remove("MR_CONFIG")
        .env_remove("MR_LOG")
        .env_remove("RUST_LOG");
    cmd
}

fn stdout_json(output: &std::process::Output) -> Value {
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}

mod report {
    use super::*;

    #[test]
    fn basic_from_inline_result() {
        let home = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let output = mr_core(&home)
            .args(["report", "basic", "--label", "Glioma", "--confidence", "92"])
            .arg("--output-dir")
            .arg(out.path())
            .output()
            .unwrap();
        assert!(output.status.success());

        let json = stdout_json(&output);
        assert_eq!(json["status"], "ok");
        assert_eq!(json["report"]["variant"], "basic");
        assert_eq!(json["result"]["tier"], "high");
        let file_name = json["report"]["file_name"].as_str().unwrap();
        assert!(file_name.starts_with("brain_tumor_analysis_"));
        let bytes = std::fs::read(out.path().join(file_name)).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn basic_from_result_file() {
        let home = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let result = out.path().join("result.json");
        std::fs::write(
            &result,
            r#"{"class": "No Tumor", "confidence": 55.0}"#,
        )
        .unwrap();

        let output = mr_core(&home)
            .args(["report", "basic", "--result"])
            .arg(&result)
            .arg("--output-dir")
            .arg(out.path())
            .output()
            .unwrap();
        assert!(output.status.success());
        let json = stdout_json(&output);
        assert_eq!(json["result"]["severity"], "Normal");
        assert_eq!(json["result"]["tier"], "low");
    }

    #[test]
    fn missing_result_exits_no_result() {
        let home = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let output = mr_core(&home)
            .args(["report", "basic", "--output-dir"])
            .arg(out.path())
            .output()
            .unwrap();
        assert_eq!(output.status.code(), Some(ExitCode::NoResult.as_i32()));
        let json = stdout_json(&output);
        assert_eq!(json["error"]["code"], "ERR_NO_RESULT");
        assert_eq!(std::fs::read_dir(out.path()).unwrap().count(), 0);
    }

    #[test]
    fn detailed_with_rendered_chart() {
        let home = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let output = mr_core(&home)
            .args([
                "report",
                "detailed",
                "--label",
                "Meningioma",
                "--confidence",
                "70",
                "--render-chart",
                "--format",
                "summary",
            ])
            .arg("--output-dir")
            .arg(out.path())
            .output()
            .unwrap();
        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("detailed_brain_tumor_analysis_"));
    }

    #[test]
    fn detailed_with_missing_snapshot_exits_capture_unavailable() {
        let home = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        mr_core(&home)
            .args(["report", "detailed", "--label", "Glioma", "--confidence", "92"])
            .arg("--snapshot")
            .arg(out.path().join("missing.png"))
            .arg("--output-dir")
            .arg(out.path())
            .assert()
            .code(ExitCode::CaptureUnavailable.as_i32())
            .stdout(predicate::str::contains("ERR_CAPTURE_UNAVAILABLE"));
    }

    #[test]
    fn detailed_requires_a_region() {
        let home = TempDir::new().unwrap();
        mr_core(&home)
            .args(["report", "detailed", "--label", "Glioma", "--confidence", "92"])
            .assert()
            .code(ExitCode::ArgsError.as_i32());
    }

    #[test]
    fn corrupt_snapshot_exits_export_failed() {
        let home = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        // Readable PNG header, undecodable IDAT payload.
        const BROKEN_PNG: [u8; 61] = [
            0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0x00, 0x00, 0x0d, 0x49, 0x48,
            0x44, 0x52, 0x00, 0x00, 0x00, 0x08, 0x00, 0x00, 0x00, 0x08, 0x08, 0x02, 0x00, 0x00,
            0x00, 0x4b, 0x6d, 0x29, 0xdc, 0x00, 0x00, 0x00, 0x04, 0x49, 0x44, 0x41, 0x54, 0x00,
            0x01, 0x02, 0x03, 0x40, 0xde, 0xbe, 0x08, 0x00, 0x00, 0x00, 0x00, 0x49, 0x45, 0x4e,
            0x44, 0xae, 0x42, 0x60, 0x82,
        ];
        let snapshot = out.path().join("broken.png");
        std::fs::write(&snapshot, BROKEN_PNG).unwrap();

        mr_core(&home)
            .args(["report", "detailed", "--label", "Glioma", "--confidence", "92"])
            .arg("--snapshot")
            .arg(&snapshot)
            .arg("--output-dir")
            .arg(out.path())
            .assert()
            .code(ExitCode::ExportFailed.as_i32());
        assert!(!std::fs::read_dir(out.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .any(|e| e.file_name().to_string_lossy().ends_with(".pdf")));
    }
}

mod commands {
    use super::*;

    #[test]
    fn tier_boundaries() {
        let home = TempDir::new().unwrap();
        let output = mr_core(&home).args(["tier", "80"]).output().unwrap();
        assert!(output.status.success());
        let json = stdout_json(&output);
        assert_eq!(json["tier"], "high");
        assert_eq!(json["color"], "#059669");

        mr_core(&home)
            .args(["tier", "59.9", "--format", "summary"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Low Confidence"));
    }

    #[test]
    fn schema_lists_wire_fields() {
        let home = TempDir::new().unwrap();
        mr_core(&home)
            .arg("schema")
            .assert()
            .success()
            .stdout(predicate::str::contains("\"class\""))
            .stdout(predicate::str::contains("\"confidence\""));
    }

    #[test]
    fn config_show_defaults_and_file() {
        let home = TempDir::new().unwrap();
        let output = mr_core(&home).args(["config", "show"]).output().unwrap();
        assert!(output.status.success());
        let json = stdout_json(&output);
        assert_eq!(json["source"]["kind"], "defaults");
        assert_eq!(json["config"]["page"]["width"], 210.0);

        let file = home.path().join("custom.toml");
        std::fs::write(&file, "model_name = \"ResNet-50\"\n").unwrap();
        let output = mr_core(&home)
            .args(["config", "show", "--config"])
            .arg(&file)
            .output()
            .unwrap();
        let json = stdout_json(&output);
        assert_eq!(json["source"]["kind"], "cli");
        assert_eq!(json["config"]["model_name"], "ResNet-50");
    }

    #[test]
    fn bad_config_exits_config_error() {
        let home = TempDir::new().unwrap();
        mr_core(&home)
            .args(["config", "show", "--config", "/nonexistent/report.toml"])
            .assert()
            .code(ExitCode::ConfigError.as_i32());
    }

    #[test]
    fn oversized_chart_scale_exits_config_error() {
        let home = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let file = home.path().join("huge.toml");
        std::fs::write(&file, "[snapshot]\nchart_scale = 20000000\n").unwrap();
        mr_core(&home)
            .args(["report", "detailed", "--label", "Glioma", "--confidence", "92"])
            .arg("--render-chart")
            .arg("--config")
            .arg(&file)
            .arg("--output-dir")
            .arg(out.path())
            .assert()
            .code(ExitCode::ConfigError.as_i32());
        assert_eq!(std::fs::read_dir(out.path()).unwrap().count(), 0);
    }

    #[test]
    fn version_reports_package() {
        let home = TempDir::new().unwrap();
        mr_core(&home)
            .args(["version", "--format", "summary"])
            .assert()
            .success()
            .stdout(predicate::str::starts_with("mr-core "));
    }
}
