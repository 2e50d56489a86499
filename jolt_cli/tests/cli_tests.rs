//! Integration tests for the jolt binary.
//!
//! These tests verify end-to-end behavior including:
//! - Event logging with backdating and validation
//! - Status, stats and history output at a pinned "now"
//! - Config handling and concurrent appends

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use std::thread;
use tempfile::TempDir;

// 2024-03-10T12:00:00Z
const NOON: i64 = 1_710_072_000_000;
const HOUR: i64 = 3_600_000;

fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Command pointed at an isolated data dir and config path
fn jolt(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("jolt").expect("Failed to find jolt binary");
    cmd.arg("--data-dir")
        .arg(dir.join("data"))
        .arg("--config")
        .arg(dir.join("config.toml"));
    cmd
}

fn log_drink(dir: &Path, substance: &str, now: i64) {
    jolt(dir)
        .args(["log", substance, "--cost", "4.5", "--now"])
        .arg(now.to_string())
        .assert()
        .success();
}

fn json_output(cmd: &mut Command) -> Value {
    let output = cmd.output().expect("Failed to run jolt");
    assert!(output.status.success(), "jolt failed: {:?}", output);
    serde_json::from_slice(&output.stdout).expect("Output is not JSON")
}

#[test]
fn test_cli_help() {
    Command::cargo_bin("jolt")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Caffeine intake tracker"));
}

#[test]
fn test_status_on_empty_log() {
    let temp_dir = setup_test_dir();

    jolt(temp_dir.path())
        .args(["status", "--now"])
        .arg(NOON.to_string())
        .assert()
        .success()
        .stdout(predicate::str::contains("Active caffeine: 0 mg [low]"));
}

#[test]
fn test_default_command_is_status() {
    let temp_dir = setup_test_dir();

    jolt(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Active caffeine:"));
}

#[test]
fn test_log_writes_event_line() {
    let temp_dir = setup_test_dir();

    jolt(temp_dir.path())
        .args(["log", "Espresso", "--cost", "3.25", "--now"])
        .arg(NOON.to_string())
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged Espresso"));

    let content = fs::read_to_string(temp_dir.path().join("data/events.jsonl"))
        .expect("Failed to read event log");
    let event: Value = serde_json::from_str(content.trim()).unwrap();
    assert_eq!(event["timestamp"], NOON);
    assert_eq!(event["substance_name"], "Espresso");
    assert_eq!(event["cost_usd"], 3.25);
}

#[test]
fn test_backdated_dose_decays_by_half() {
    let temp_dir = setup_test_dir();

    jolt(temp_dir.path())
        .args(["log", "Double Espresso", "--hours", "4", "--minutes", "30"])
        .args(["--now", &(NOON - 30 * 60_000).to_string()])
        .assert()
        .success();

    // Consumed at NOON - 5h; one half-life later 126 mg -> 63 mg
    jolt(temp_dir.path())
        .args(["status", "--now"])
        .arg(NOON.to_string())
        .assert()
        .success()
        .stdout(predicate::str::contains("Active caffeine: 63 mg [low]"));
}

#[test]
fn test_unknown_substance_rejected() {
    let temp_dir = setup_test_dir();

    jolt(temp_dir.path())
        .args(["log", "Unicorn Frappe"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("UnknownSubstance"));

    assert!(!temp_dir.path().join("data/events.jsonl").exists());
}

#[test]
fn test_invalid_cost_and_minutes_rejected() {
    let temp_dir = setup_test_dir();

    jolt(temp_dir.path())
        .args(["log", "Latte", "--cost=-1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("InvalidEvent"));

    jolt(temp_dir.path())
        .args(["log", "Latte", "--minutes", "60"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("InvalidEvent"));
}

#[test]
fn test_stats_json_ranking() {
    let temp_dir = setup_test_dir();
    let drinks = ["Espresso", "Latte", "Espresso", "Mocha", "Latte", "Espresso"];
    for (i, drink) in drinks.iter().enumerate() {
        log_drink(temp_dir.path(), drink, NOON - (i as i64 + 1) * HOUR);
    }

    let report = json_output(
        jolt(temp_dir.path())
            .args(["stats", "--json", "--now"])
            .arg(NOON.to_string()),
    );

    let top = report["top"].as_array().unwrap();
    assert_eq!(top.len(), 3);
    assert_eq!(top[0]["substance_name"], "Espresso");
    assert_eq!(top[0]["count"], 3);
    assert_eq!(top[0]["percentage"], 50);
    assert_eq!(top[1]["percentage"], 33);
    assert_eq!(top[2]["substance_name"], "Mocha");
    assert_eq!(top[2]["percentage"], 17);

    assert_eq!(report["stats"]["daily_caffeine_mg"], 378.0);
    assert_eq!(report["stats"]["total_cost_usd"], 27.0);
    assert_eq!(report["event_count"], 6);
}

#[test]
fn test_stats_top_limits_ranking() {
    let temp_dir = setup_test_dir();
    log_drink(temp_dir.path(), "Espresso", NOON - HOUR);
    log_drink(temp_dir.path(), "Latte", NOON - 2 * HOUR);

    let report = json_output(
        jolt(temp_dir.path())
            .args(["stats", "--json", "--top", "5", "--now"])
            .arg(NOON.to_string()),
    );
    assert_eq!(report["top"].as_array().unwrap().len(), 2);
}

#[test]
fn test_history_newest_first() {
    let temp_dir = setup_test_dir();
    log_drink(temp_dir.path(), "Cold Brew", NOON - 3 * HOUR);
    log_drink(temp_dir.path(), "Green Tea", NOON - HOUR);

    let output = jolt(temp_dir.path())
        .args(["history", "--now"])
        .arg(NOON.to_string())
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("Green Tea | 1h 0m ago"));
    assert!(lines[1].starts_with("Cold Brew | 3h 0m ago"));
    assert!(lines[1].ends_with("/ 155 mg"));
}

#[test]
fn test_custom_substance_from_config() {
    let temp_dir = setup_test_dir();
    fs::write(
        temp_dir.path().join("config.toml"),
        r#"
[[catalog.custom]]
name = "Office Pod"
caffeine_mg = 110.0
"#,
    )
    .unwrap();

    log_drink(temp_dir.path(), "Office Pod", NOON);

    jolt(temp_dir.path())
        .args(["status", "--now"])
        .arg(NOON.to_string())
        .assert()
        .success()
        .stdout(predicate::str::contains("110 mg [moderate]"));
}

#[test]
fn test_config_thresholds_applied() {
    let temp_dir = setup_test_dir();
    fs::write(
        temp_dir.path().join("config.toml"),
        "[status]\nlow_max = 20.0\nmoderate_max = 50.0\n",
    )
    .unwrap();

    log_drink(temp_dir.path(), "Espresso", NOON);

    jolt(temp_dir.path())
        .args(["status", "--now"])
        .arg(NOON.to_string())
        .assert()
        .success()
        .stdout(predicate::str::contains("63 mg [high]"));
}

#[test]
fn test_init_writes_config_once() {
    let temp_dir = setup_test_dir();
    let config_path = temp_dir.path().join("config.toml");

    jolt(temp_dir.path()).arg("init").assert().success();
    let written = fs::read_to_string(&config_path).unwrap();
    assert!(written.contains("half_life_hours"));

    jolt(temp_dir.path()).arg("init").assert().failure();
    jolt(temp_dir.path()).args(["init", "--force"]).assert().success();
}

#[test]
fn test_init_force_restores_defaults() {
    let temp_dir = setup_test_dir();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "[status]\nlow_max = 20.0\nmoderate_max = 50.0\n").unwrap();

    jolt(temp_dir.path()).args(["init", "--force"]).assert().success();

    let config = jolt_core::Config::load_from(&config_path).unwrap();
    assert_eq!(config.status.low_max, 100.0);
    assert_eq!(config.status.moderate_max, 200.0);
    assert_eq!(config.data.data_dir, temp_dir.path().join("data"));
}

#[test]
fn test_init_force_replaces_invalid_config() {
    let temp_dir = setup_test_dir();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "[status]\nlow_max = 300.0\n").unwrap();

    // Any other command refuses to run on this file
    jolt(temp_dir.path()).arg("status").assert().failure();

    jolt(temp_dir.path()).args(["init", "--force"]).assert().success();
    let config = jolt_core::Config::load_from(&config_path).unwrap();
    assert_eq!(config.status.low_max, 100.0);

    jolt(temp_dir.path())
        .args(["status", "--now"])
        .arg(NOON.to_string())
        .assert()
        .success();
}

#[test]
fn test_substances_listing() {
    let temp_dir = setup_test_dir();

    jolt(temp_dir.path())
        .arg("substances")
        .assert()
        .success()
        .stdout(predicate::str::contains("Nitro Cold Brew"));
}

#[test]
fn test_concurrent_logging() {
    let temp_dir = setup_test_dir();
    let dir = temp_dir.path().to_path_buf();

    let handles: Vec<_> = (0..5)
        .map(|i| {
            let dir = dir.clone();
            thread::spawn(move || log_drink(&dir, "Espresso", NOON - i * HOUR))
        })
        .collect();
    for handle in handles {
        handle.join().expect("logging thread panicked");
    }

    let content = fs::read_to_string(dir.join("data/events.jsonl")).unwrap();
    assert_eq!(content.lines().count(), 5);
    for line in content.lines() {
        serde_json::from_str::<Value>(line).expect("Interleaved write");
    }
}
