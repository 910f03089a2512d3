#![forbid(unsafe_code)]
use assert_cmd::Command;
use chrono::{SecondsFormat, Utc};
use flight_rests::{JsonStorage, RestPlan, Storage};
use predicates::prelude::*;
use std::path::Path;
use tempfile::tempdir;

fn cli(history: &Path) -> Command {
    let mut cmd = Command::cargo_bin("flight-rests-cli").unwrap();
    cmd.arg("--history").arg(history);
    cmd
}

#[test]
fn plan_prints_assigned_rests() {
    let dir = tempdir().unwrap();
    cli(&dir.path().join("h.json"))
        .args([
            "plan",
            "--begin",
            "22:00",
            "--end",
            "01:00",
            "--now",
            "2024-05-10T21:00:00Z",
            "--no-save",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Flight Crew Rests"))
        .stdout(predicate::str::contains(
            "Pilot 2  23:30 UTC → 00:55 UTC  (1:25)",
        ));
    assert!(!dir.path().join("h.json").exists());
}

#[test]
fn cabin_crew_plan_ends_before_service() {
    let dir = tempdir().unwrap();
    cli(&dir.path().join("h.json"))
        .args([
            "plan",
            "--role",
            "cabin",
            "--begin",
            "01:00",
            "--landing",
            "07:00",
            "--service",
            "1h30",
            "--periods",
            "3",
            "--now",
            "2024-05-10T23:00:00Z",
            "--no-save",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Group 3  04:00 UTC → 05:25 UTC  (1:25)",
        ));
}

#[test]
fn cabin_crew_plan_with_four_groups() {
    let dir = tempdir().unwrap();
    cli(&dir.path().join("h.json"))
        .args([
            "plan",
            "--role",
            "cabin",
            "--begin",
            "01:00",
            "--landing",
            "07:00",
            "--service",
            "1h30",
            "--periods",
            "4",
            "--now",
            "2024-05-10T23:00:00Z",
            "--no-save",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cabin Crew Rests"))
        .stdout(predicate::str::contains(
            "Group 4  04:15 UTC → 05:15 UTC  (1:00)",
        ));
}

#[test]
fn flight_crew_users_out_of_range_are_refused() {
    let dir = tempdir().unwrap();
    cli(&dir.path().join("h.json"))
        .args([
            "plan", "--begin", "22:00", "--end", "01:00", "--users", "4", "--now",
            "2024-05-10T21:00:00Z",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--users must be within"));
}

#[test]
fn plan_exports_csv_and_json() {
    let dir = tempdir().unwrap();
    let csv = dir.path().join("plan.csv");
    let json = dir.path().join("plan.json");
    cli(&dir.path().join("h.json"))
        .args([
            "plan",
            "--begin",
            "22:00",
            "--end",
            "01:00",
            "--now",
            "2024-05-10T21:00:00Z",
            "--no-save",
            "--out-csv",
        ])
        .arg(&csv)
        .arg("--out-json")
        .arg(&json)
        .assert()
        .success();

    let text = std::fs::read_to_string(&csv).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "owner,label,start,end,duration_minutes");
    assert_eq!(lines.len(), 3);
    assert_eq!(
        lines[2],
        "2,Pilot 2,2024-05-10T23:30:00+00:00,2024-05-11T00:55:00+00:00,85"
    );

    let plan: RestPlan = serde_json::from_str(&std::fs::read_to_string(&json).unwrap()).unwrap();
    assert_eq!(plan.title(), "Flight Crew Rests");
    assert_eq!(plan.time_zone, chrono_tz::UTC);
    assert_eq!(plan.rest_periods.len(), 2);
    assert_eq!(plan.rest_periods[1].owner, 2);
    assert_eq!(plan.rest_periods[1].period.duration_minutes(), 85);
}

#[test]
fn defaults_file_sets_selections() {
    let dir = tempdir().unwrap();
    let defaults = dir.path().join("defaults.json");
    std::fs::write(&defaults, r#"{ "periods": 4 }"#).unwrap();
    cli(&dir.path().join("h.json"))
        .arg("--defaults")
        .arg(&defaults)
        .args([
            "plan",
            "--begin",
            "22:00",
            "--end",
            "01:00",
            "--now",
            "2024-05-10T21:00:00Z",
            "--no-save",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Pilot 2  00:15 UTC → 00:55 UTC  (0:40)",
        ));
}

#[test]
fn invalid_defaults_file_is_an_error() {
    let dir = tempdir().unwrap();
    let defaults = dir.path().join("defaults.json");
    std::fs::write(&defaults, r#"{ "periods": 9 }"#).unwrap();
    cli(&dir.path().join("h.json"))
        .arg("--defaults")
        .arg(&defaults)
        .args(["history", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("default periods must be within"));
}

#[test]
fn too_short_window_exits_with_code_2() {
    let dir = tempdir().unwrap();
    cli(&dir.path().join("h.json"))
        .args([
            "validate",
            "--begin",
            "22:00",
            "--end",
            "22:10",
            "--now",
            "2024-05-10T21:00:00Z",
        ])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("too short"));
}

#[test]
fn missing_end_is_an_error() {
    let dir = tempdir().unwrap();
    cli(&dir.path().join("h.json"))
        .args(["plan", "--begin", "22:00"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--end is required"));
}

#[test]
fn history_lists_and_clears_saved_requests() {
    let dir = tempdir().unwrap();
    let history = dir.path().join("h.json");
    let now = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);

    cli(&history)
        .args(["plan", "--begin", "12:00", "--end", "15:00", "--now", &now])
        .assert()
        .success();
    assert!(history.exists());

    cli(&history)
        .args(["history", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("FlightCrew 2×2"));

    cli(&history).args(["history", "clear"]).assert().success();

    cli(&history)
        .args(["history", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No recent requests"));
}

#[test]
fn removing_unknown_request_fails() {
    let dir = tempdir().unwrap();
    cli(&dir.path().join("h.json"))
        .args(["history", "remove", "--id", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown request: nope"));
}

fn saved_request_id(history: &Path) -> String {
    let requests = JsonStorage::open(history).unwrap().load().unwrap();
    assert_eq!(requests.len(), 1);
    requests[0].id.as_str().to_string()
}

#[test]
fn history_replay_uses_request_or_given_zone() {
    let dir = tempdir().unwrap();
    let history = dir.path().join("h.json");
    let now = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);

    cli(&history)
        .args(["plan", "--begin", "12:00", "--end", "15:00", "--now", &now])
        .assert()
        .success();
    let id = saved_request_id(&history);

    cli(&history)
        .args(["history", "replay", "--id", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Pilot 1  12:00 UTC → 13:25 UTC  (1:25)",
        ));

    cli(&history)
        .args(["history", "replay", "--id", &id, "--tz", "Asia/Tokyo"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Pilot 1  21:00 JST → 22:25 JST  (1:25)",
        ));
}

#[test]
fn removed_request_is_gone_after_reload() {
    let dir = tempdir().unwrap();
    let history = dir.path().join("h.json");
    let now = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);

    cli(&history)
        .args(["plan", "--begin", "12:00", "--end", "15:00", "--now", &now])
        .assert()
        .success();
    let id = saved_request_id(&history);

    cli(&history)
        .args(["history", "remove", "--id", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("Removed {id}")));

    assert!(JsonStorage::open(&history).unwrap().load().unwrap().is_empty());
    cli(&history)
        .args(["history", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No recent requests"));
}
