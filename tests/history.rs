#![forbid(unsafe_code)]
use chrono::{TimeDelta, TimeZone, Utc};
use flight_rests::{CrewRole, JsonStorage, RequestLog, RestRequest, Storage};
use tempfile::tempdir;

fn sample(offset_min: i64) -> RestRequest {
    let created = Utc.with_ymd_and_hms(2024, 9, 1, 12, 0, 0).unwrap();
    let begin = created + TimeDelta::minutes(offset_min);
    RestRequest::new(
        begin,
        begin + TimeDelta::hours(4),
        CrewRole::CabinCrew,
        chrono_tz::Europe::Lisbon,
        created + TimeDelta::minutes(offset_min),
    )
    .with_periods(3)
    .with_optimised_breaks(true)
}

#[test]
fn missing_file_loads_empty_history() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("history.json");
    let storage = JsonStorage::open(&path).unwrap();
    assert_eq!(storage.path(), path.as_path());
    assert!(storage.load().unwrap().is_empty());
}

#[test]
fn save_and_load_history_roundtrip() {
    let dir = tempdir().unwrap();
    let storage = JsonStorage::open(dir.path().join("history.json")).unwrap();
    let now = Utc.with_ymd_and_hms(2024, 9, 2, 0, 0, 0).unwrap();

    let mut log = RequestLog::new();
    log.add_request(sample(0), now);
    log.add_request(sample(30), now);
    storage.save(log.requests()).unwrap();

    let restored = RequestLog::new().restore(storage.load().unwrap(), now);
    assert_eq!(restored.requests(), log.requests());
    assert_eq!(restored.requests()[0].time_zone, chrono_tz::Europe::Lisbon);
    assert_eq!(restored.requests()[0].number_of_users, 3);
}

#[test]
fn corrupt_file_is_reported() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("history.json");
    std::fs::write(&path, b"{ not json").unwrap();
    let storage = JsonStorage::open(&path).unwrap();
    let err = storage.load().unwrap_err();
    assert!(format!("{err:#}").contains("parsing"));
}

#[test]
fn restore_applies_retention_and_cap() {
    let now = Utc.with_ymd_and_hms(2024, 9, 2, 0, 0, 0).unwrap();
    let mut old = sample(0);
    old.creation_instant = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let restored = RequestLog::with_limits(2, 6).restore(vec![old, sample(10), sample(20), sample(30)], now);

    assert_eq!(restored.len(), 2);
    assert_eq!(restored.requests()[0].creation_instant, sample(30).creation_instant);
}
