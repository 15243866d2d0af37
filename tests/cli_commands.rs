use std::path::Path;
use std::process::{Command, Output};

use temp_dir::TempDir;

fn glucoplan(dir: &Path, args: &[&str]) -> Output {
    let config = dir.join("glucoplan.toml");
    let database = format!("sqlite:{}", dir.join("db.sqlite3").display());

    Command::new(env!("CARGO_BIN_EXE_glucoplan"))
        .arg("--config")
        .arg(&config)
        .args(args)
        .env("GLUCOPLAN__DATABASE__URL", database)
        .env_remove("DATABASE_URL")
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run glucoplan")
}

fn setup() -> TempDir {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.child("glucoplan.toml"),
        r#"
[planner]
timezone = "UTC"
user_id = "john"
seed = 11

[profile]
diabetes_class = "type2"
onboarding_complete = true

[observability]
log_level = "warn"
"#,
    )
    .unwrap();

    let output = glucoplan(dir.path(), &["migrate"]);
    assert!(output.status.success(), "{output:?}");

    dir
}

fn json(output: &Output) -> serde_json::Value {
    assert!(output.status.success(), "{output:?}");
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_cli_help() {
    let output = Command::new(env!("CARGO_BIN_EXE_glucoplan"))
        .arg("--help")
        .output()
        .unwrap();

    assert!(output.status.success());
    let help = String::from_utf8_lossy(&output.stdout);
    assert!(help.contains("migrate"));
    assert!(help.contains("plan"));
    assert!(help.contains("track"));
}

#[test]
fn test_cli_plan_sync_then_show() {
    let dir = setup();

    let synced = json(&glucoplan(dir.path(), &["--json", "plan", "sync"]));
    let days = synced.as_array().unwrap();
    assert_eq!(days.len(), 15);
    assert!(days[0]["meals"]["breakfast"]["medication_linked"].as_bool().unwrap());

    let shown = json(&glucoplan(dir.path(), &["--json", "plan", "show"]));
    assert_eq!(shown, synced);

    let other = json(&glucoplan(
        dir.path(),
        &["--json", "--user", "albert", "plan", "show"],
    ));
    assert!(other.as_array().unwrap().is_empty());
}

#[test]
fn test_cli_swap_and_track() {
    let dir = setup();

    let synced = json(&glucoplan(dir.path(), &["--json", "plan", "sync"]));
    let today = synced[0]["date"].as_str().unwrap().to_owned();
    let before = synced[0]["meals"]["dinner"]["id"].as_str().unwrap().to_owned();

    let swapped = json(&glucoplan(
        dir.path(),
        &[
            "--json", "plan", "swap", "--date", &today, "--slot", "dinner",
        ],
    ));
    assert_eq!(swapped["date"].as_str(), Some(today.as_str()));
    assert_ne!(swapped["meals"]["dinner"]["id"].as_str(), Some(before.as_str()));
    assert_eq!(swapped["meals"]["lunch"], synced[0]["meals"]["lunch"]);

    let record = json(&glucoplan(
        dir.path(),
        &["--json", "track", "medication", "--date", &today, "--slot", "dinner"],
    ));
    assert_eq!(record["medication_taken"], serde_json::json!(["dinner"]));

    let rejected = glucoplan(
        dir.path(),
        &["track", "medication", "--date", &today, "--slot", "lunch"],
    );
    assert!(!rejected.status.success());
}

#[test]
fn test_cli_rejects_malformed_date() {
    let dir = setup();

    let output = glucoplan(
        dir.path(),
        &["plan", "swap", "--date", "10/05/2025", "--slot", "lunch"],
    );

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid date"));
}
