use std::env;
use std::fs;
use std::sync::{Mutex, OnceLock};

use serde_json::Value;
use tempfile::TempDir;
use tienda_cli::commands::{config, doctor, seed};

#[test]
fn seed_writes_sample_catalog_to_configured_path() {
    let dir = TempDir::new().expect("temp dir");
    let data_file = dir.path().join("catalog").join("products.json");

    with_env(&[("TIENDA_DATA_FILE", data_file.to_str().expect("utf-8 path"))], || {
        let result = seed::run(false);
        assert_eq!(result.exit_code, 0, "expected successful seed run");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "seed");
        assert_eq!(payload["status"], "ok");

        let raw = fs::read(&data_file).expect("seeded data file should exist");
        let products: Value = serde_json::from_slice(&raw).expect("seeded file should be JSON");
        assert_eq!(products.as_array().map(Vec::len), Some(5));
    });
}

#[test]
fn seed_refuses_existing_data_file_without_force() {
    let dir = TempDir::new().expect("temp dir");
    let data_file = dir.path().join("products.json");
    fs::write(&data_file, "[]").expect("pre-existing data file");

    with_env(&[("TIENDA_DATA_FILE", data_file.to_str().expect("utf-8 path"))], || {
        let result = seed::run(false);
        assert_eq!(result.exit_code, 4, "expected refusal to overwrite");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "seed");
        assert_eq!(payload["status"], "error");
        assert_eq!(payload["error_class"], "data_file_exists");

        let raw = fs::read_to_string(&data_file).expect("data file should survive");
        assert_eq!(raw, "[]", "refused seed must not touch the existing file");
    });
}

#[test]
fn seed_overwrites_existing_data_file_with_force() {
    let dir = TempDir::new().expect("temp dir");
    let data_file = dir.path().join("products.json");
    fs::write(&data_file, "[]").expect("pre-existing data file");

    with_env(&[("TIENDA_DATA_FILE", data_file.to_str().expect("utf-8 path"))], || {
        let result = seed::run(true);
        assert_eq!(result.exit_code, 0, "expected forced seed success");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["status"], "ok");

        let raw = fs::read(&data_file).expect("data file should exist");
        let products: Value = serde_json::from_slice(&raw).expect("seeded file should be JSON");
        assert_eq!(products.as_array().map(Vec::len), Some(5));
    });
}

#[test]
fn doctor_passes_when_data_file_is_absent() {
    let dir = TempDir::new().expect("temp dir");
    let data_file = dir.path().join("products.json");

    with_env(&[("TIENDA_DATA_FILE", data_file.to_str().expect("utf-8 path"))], || {
        let output = doctor::run(true);
        let report = parse_payload(&output);

        assert_eq!(report["overall_status"], "pass");
        let checks = report["checks"].as_array().expect("checks array");
        assert!(checks.iter().any(|check| check["name"] == "config_validation"
            && check["status"] == "pass"));
        assert!(checks
            .iter()
            .any(|check| check["name"] == "data_file" && check["status"] == "pass"));
    });
}

#[test]
fn doctor_fails_on_corrupt_data_file() {
    let dir = TempDir::new().expect("temp dir");
    let data_file = dir.path().join("products.json");
    fs::write(&data_file, "{not valid json").expect("corrupt data file");

    with_env(&[("TIENDA_DATA_FILE", data_file.to_str().expect("utf-8 path"))], || {
        let output = doctor::run(true);
        let report = parse_payload(&output);

        assert_eq!(report["overall_status"], "fail");
        let checks = report["checks"].as_array().expect("checks array");
        assert!(checks
            .iter()
            .any(|check| check["name"] == "data_file" && check["status"] == "fail"));
    });
}

#[test]
fn doctor_fails_on_invalid_config() {
    with_env(&[("TIENDA_SERVER_PORT", "not-a-port")], || {
        let output = doctor::run(true);
        let report = parse_payload(&output);

        assert_eq!(report["overall_status"], "fail");
        let checks = report["checks"].as_array().expect("checks array");
        assert!(checks.iter().any(|check| check["name"] == "config_validation"
            && check["status"] == "fail"));
        assert!(checks
            .iter()
            .any(|check| check["name"] == "data_file" && check["status"] == "skipped"));
    });
}

#[test]
fn config_reports_env_source_for_overridden_fields() {
    let dir = TempDir::new().expect("temp dir");
    let data_file = dir.path().join("products.json");

    with_env(&[("TIENDA_DATA_FILE", data_file.to_str().expect("utf-8 path"))], || {
        let output = config::run();

        assert!(output.starts_with("effective config (source precedence: env > file > default):"));
        let data_file_line = output
            .lines()
            .find(|line| line.starts_with("- storage.data_file"))
            .expect("storage.data_file line");
        assert!(data_file_line.contains("(source: env (TIENDA_DATA_FILE))"));

        let port_line = output
            .lines()
            .find(|line| line.starts_with("- server.port"))
            .expect("server.port line");
        assert!(port_line.contains("(source: default)"));
    });
}

fn parse_payload(output: &str) -> Value {
    serde_json::from_str(output).expect("command output should be valid JSON")
}

fn with_env(vars: &[(&str, &str)], test_fn: impl FnOnce()) {
    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    let _guard =
        ENV_LOCK.get_or_init(|| Mutex::new(())).lock().expect("env mutex should not be poisoned");

    let keys = [
        "TIENDA_DATA_FILE",
        "TIENDA_SERVER_BIND_ADDRESS",
        "TIENDA_SERVER_PORT",
        "TIENDA_SERVER_GRACEFUL_SHUTDOWN_SECS",
        "TIENDA_PAGINATION_DEFAULT_LIMIT",
        "TIENDA_PAGINATION_MAX_LIMIT",
        "TIENDA_LOGGING_LEVEL",
        "TIENDA_LOGGING_FORMAT",
        "TIENDA_LOG_LEVEL",
        "TIENDA_LOG_FORMAT",
    ];

    let previous_values: Vec<(&str, Option<String>)> =
        keys.iter().map(|key| (*key, env::var(key).ok())).collect();

    for key in &keys {
        env::remove_var(key);
    }
    for (key, value) in vars {
        env::set_var(key, value);
    }

    test_fn();

    for (key, value) in previous_values {
        if let Some(value) = value {
            env::set_var(key, value);
        } else {
            env::remove_var(key);
        }
    }
}
