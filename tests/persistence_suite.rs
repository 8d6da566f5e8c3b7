mod common;

use std::collections::HashSet;
use std::fs;

use month_manager::{
    core::clock::FixedClock,
    ledger::{Category, Period, Transaction},
    storage::{
        JsonFileStore, JsonStorage, Scope, StorageScope, TransactionStorage, EXPENSES_KEY,
        INCOMES_KEY,
    },
};
use uuid::Uuid;

use common::{date, open_manager, setup_test_env, temp_base};

fn file_storage() -> (JsonStorage<JsonFileStore>, JsonFileStore) {
    let store = JsonFileStore::new(temp_base().join("data")).expect("file store");
    (JsonStorage::new(store.clone()), store)
}

fn sample_collection() -> Vec<Transaction> {
    let clock = FixedClock::new(date(2024, 5, 20));
    vec![
        Transaction::income("Salary", "3000", Some(date(2024, 5, 1)), &clock).unwrap(),
        Transaction::expense("Rent", "1000", Some(Category::Rent), Some(date(2024, 5, 1)), &clock)
            .unwrap(),
        Transaction::expense("Groceries", "200", Some(Category::Food), Some(date(2024, 5, 15)), &clock)
            .unwrap(),
        Transaction::expense("Bus pass", "60", None, Some(date(2024, 6, 1)), &clock).unwrap(),
    ]
}

fn ids(transactions: &[Transaction]) -> HashSet<Uuid> {
    transactions.iter().map(Transaction::id).collect()
}

#[test]
fn global_round_trip_preserves_every_transaction() {
    let (storage, _) = file_storage();
    let original = sample_collection();
    storage.save(Scope::Global, &original).expect("save");

    let loaded = storage.load(Scope::Global);
    assert_eq!(ids(&loaded), ids(&original));
    for txn in &original {
        let reloaded = loaded.iter().find(|t| t.id() == txn.id()).unwrap();
        assert_eq!(reloaded, txn);
    }
}

#[test]
fn period_round_trip_preserves_order() {
    let (storage, store) = file_storage();
    let may = Period::new(2024, 5).unwrap();
    let original = sample_collection();
    storage.save(Scope::Period(may), &original).expect("save");

    assert_eq!(storage.load(Scope::Period(may)), original);
    assert!(store
        .blob_path("month-manager-transactions-2024-05")
        .exists());
}

#[test]
fn missing_files_load_as_empty() {
    let (storage, _) = file_storage();
    assert!(storage.load(Scope::Global).is_empty());
    assert!(storage
        .load(Scope::Period(Period::new(2030, 1).unwrap()))
        .is_empty());
}

#[test]
fn corrupted_files_load_as_empty() {
    let (storage, store) = file_storage();
    storage.save(Scope::Global, &sample_collection()).unwrap();
    fs::write(store.blob_path(EXPENSES_KEY), "[{\"id\": 42").unwrap();
    fs::write(store.blob_path(INCOMES_KEY), [0xff, 0xfe, 0x00]).unwrap();

    assert!(storage.load(Scope::Global).is_empty());
}

#[test]
fn save_replaces_rather_than_appends() {
    let (storage, _) = file_storage();
    let mut collection = sample_collection();
    storage.save(Scope::Global, &collection).unwrap();
    collection.truncate(1);
    storage.save(Scope::Global, &collection).unwrap();
    assert_eq!(storage.load(Scope::Global), collection);
}

#[test]
fn reads_data_written_by_the_browser_app() {
    let (storage, store) = file_storage();
    fs::write(
        store.blob_path(EXPENSES_KEY),
        r#"[{"id":"0b6f3f0e-3c1d-4a7e-9a43-51c9f3a0d7a2","name":"Netflix","amount":15.99,"category":"Entertainment","date":"2024-05-03"}]"#,
    )
    .unwrap();
    fs::write(
        store.blob_path(INCOMES_KEY),
        r#"[{"id":"4c1e5b8a-2d6f-4f0e-8b1a-7e9d3c2b1a00","source":"Freelance","amount":450,"date":"2024-05-09"}]"#,
    )
    .unwrap();

    let loaded = storage.load(Scope::Global);
    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded[0].category(), Some(Category::Entertainment));
    assert_eq!(loaded[1].label(), "Freelance");
    assert_eq!(loaded[1].category(), None);
}

#[test]
fn manager_state_survives_reopen() {
    let (mut manager, base) = setup_test_env(StorageScope::Global);
    let rent = manager
        .add_expense("Rent", "1000", Some("Rent"), Some("2024-05-01"))
        .unwrap();
    let salary = manager.add_income("Salary", "3000", Some("2024-05-01")).unwrap();
    assert!(manager.delete(rent).unwrap());

    let reopened = open_manager(&base, StorageScope::Global);
    assert_eq!(ids(reopened.transactions()), HashSet::from([salary]));
}

#[test]
fn monthly_scope_isolates_months_on_disk() {
    let (mut manager, base) = setup_test_env(StorageScope::Monthly);
    manager
        .add_expense("Rent", "1000", Some("Rent"), Some("2024-05-01"))
        .unwrap();
    manager
        .add_expense("Rent", "1000", Some("Rent"), Some("2024-06-01"))
        .unwrap();

    let data = base.join("data");
    assert!(data.join("month-manager-transactions-2024-05.json").exists());
    assert!(data.join("month-manager-transactions-2024-06.json").exists());
    assert!(!data.join(format!("{EXPENSES_KEY}.json")).exists());

    let mut reopened = open_manager(&base, StorageScope::Monthly);
    assert_eq!(reopened.transactions().len(), 1);
    reopened.select_period(Period::new(2024, 6).unwrap());
    assert_eq!(reopened.transactions().len(), 1);
    assert_eq!(reopened.transactions()[0].date(), date(2024, 6, 1));
}
