#![allow(dead_code)]

use std::{path::PathBuf, sync::Mutex};

use chrono::NaiveDate;
use month_manager::{
    config::{Config, ConfigManager},
    core::{budget_manager::BudgetManager, clock::FixedClock},
    storage::{JsonFileStore, JsonStorage, StorageScope},
};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates a fresh base directory that outlives the calling test.
pub fn temp_base() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

/// Opens a manager over JSON files in `base`, with today pinned to 2024-05-20.
pub fn open_manager(base: &PathBuf, scope: StorageScope) -> BudgetManager {
    let config_manager = ConfigManager::with_base_dir(base.clone()).expect("config manager");
    let config = Config {
        storage_scope: scope,
        ..Config::default()
    };
    let store = JsonFileStore::new(config_manager.data_dir(&config)).expect("file store");
    BudgetManager::new(
        Box::new(JsonStorage::new(store)),
        scope,
        Box::new(FixedClock::new(date(2024, 5, 20))),
    )
}

/// Creates an isolated manager backed by a unique directory.
pub fn setup_test_env(scope: StorageScope) -> (BudgetManager, PathBuf) {
    let base = temp_base();
    (open_manager(&base, scope), base)
}
