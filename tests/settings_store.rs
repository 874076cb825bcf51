use std::fs;

use tempfile::TempDir;

use numdr::session::problem::Operation;
use numdr::settings::{OperationSet, Settings};
use numdr::store::SettingsBackend;
use numdr::store::json_store::{JsonStore, SETTINGS_FILE};
use numdr::store::settings_store::SettingsStore;

fn store_in(dir: &TempDir) -> SettingsStore {
    let backend = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
    SettingsStore::load(Box::new(backend))
}

#[test]
fn fresh_directory_gives_defaults() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    assert_eq!(store.settings(), &Settings::default());
    assert!(!dir.path().join(SETTINGS_FILE).exists());
}

#[test]
fn updates_survive_a_restart() {
    let dir = TempDir::new().unwrap();
    {
        let mut store = store_in(&dir);
        store
            .update(|s| {
                s.grade_level = 7;
                s.operations = OperationSet::only(Operation::Division);
                s.problem_count = 20;
                s.time_per_problem_secs = 0;
            })
            .unwrap();
    }

    let store = store_in(&dir);
    let settings = store.settings();
    assert_eq!(settings.grade_level, 7);
    assert_eq!(settings.operations.enabled(), vec![Operation::Division]);
    assert_eq!(settings.problem_count, 20);
    assert!(!settings.has_time_limit());
}

#[test]
fn malformed_file_falls_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(SETTINGS_FILE), "{\"schema_version\": 1, \"settings\": [").unwrap();
    let store = store_in(&dir);
    assert_eq!(store.settings(), &Settings::default());
}

#[test]
fn out_of_range_file_values_are_clamped() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(SETTINGS_FILE),
        r#"{"schema_version": 1, "settings": {"grade_level": 2, "problem_count": 0, "time_per_problem_secs": 999}}"#,
    )
    .unwrap();
    let store = store_in(&dir);
    assert_eq!(store.settings().grade_level, 4);
    assert_eq!(store.settings().problem_count, 1);
    assert_eq!(store.settings().time_per_problem_secs, 120);
}

#[test]
fn missing_fields_take_defaults() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(SETTINGS_FILE),
        r#"{"schema_version": 1, "settings": {"grade_level": 6}}"#,
    )
    .unwrap();
    let store = store_in(&dir);
    assert_eq!(store.settings().grade_level, 6);
    assert_eq!(store.settings().operations, OperationSet::all());
    assert_eq!(store.settings().problem_count, 10);
    assert_eq!(store.settings().time_per_problem_secs, 30);
}

#[test]
fn saves_leave_no_temp_file_behind() {
    let dir = TempDir::new().unwrap();
    let mut store = store_in(&dir);
    store.update(|s| s.next_grade()).unwrap();

    let names: Vec<String> = fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec![SETTINGS_FILE.to_string()]);
}

#[test]
fn json_backend_reads_back_raw_record() {
    let dir = TempDir::new().unwrap();
    let backend = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
    assert!(backend.read().unwrap().is_none());
    backend.write("{\"hello\": 1}").unwrap();
    assert_eq!(backend.read().unwrap().as_deref(), Some("{\"hello\": 1}"));
}
