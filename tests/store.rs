use std::fs;

use tempfile::TempDir;
use userstore::{JsonFileStore, Operations, Record, RecordSet, RecordSetOperation};

fn store_in(temp_dir: &TempDir) -> JsonFileStore {
    JsonFileStore::new(temp_dir.path().join("users.json"))
}

#[test]
fn load_treats_missing_empty_and_null_as_empty() {
    let temp_dir = TempDir::new().unwrap();
    let store = store_in(&temp_dir);

    assert!(store.load().unwrap().is_empty());

    fs::write(store.path(), "").unwrap();
    assert!(store.load().unwrap().is_empty());

    fs::write(store.path(), "null").unwrap();
    assert!(store.load().unwrap().is_empty());
}

#[test]
fn load_propagates_read_errors_other_than_not_found() {
    let temp_dir = TempDir::new().unwrap();
    // A directory cannot be read as a file.
    let store = JsonFileStore::new(temp_dir.path());
    assert!(store.load().is_err());
}

#[test]
fn persist_keeps_order_and_overwrites() {
    let temp_dir = TempDir::new().unwrap();
    let store = store_in(&temp_dir);
    fs::write(store.path(), "garbage that is longer than the new content").unwrap();

    let records = RecordSet::new(vec![
        Record::new("b", "b@x.com", 2),
        Record::new("a", "a@x.com", 1),
    ]);
    store.persist(&records).unwrap();

    assert_eq!(
        fs::read_to_string(store.path()).unwrap(),
        r#"[{"id":"b","email":"b@x.com","age":2},{"id":"a","email":"a@x.com","age":1}]"#
    );
    let ids: Vec<String> = store.load().unwrap().iter().map(|r| r.id.clone()).collect();
    assert_eq!(ids, vec!["b", "a"]);
}

#[test]
fn operations_test() {
    let temp_dir = TempDir::new().unwrap();
    let store = store_in(&temp_dir);
    let record = Record::new("1", "a@b.com", 30);

    assert_eq!(store.add(record.clone()).unwrap(), RecordSetOperation::Inserted);
    assert_eq!(
        store.add(Record::new("1", "z@b.com", 1)).unwrap(),
        RecordSetOperation::Exists
    );
    assert_eq!(store.list().unwrap().len(), 1);
    assert_eq!(store.find_by_id("1").unwrap(), Some(record));

    assert_eq!(store.remove("2").unwrap(), RecordSetOperation::NotFound);
    assert_eq!(store.remove("1").unwrap(), RecordSetOperation::Removed);
    assert_eq!(store.find_by_id("1").unwrap(), None);
    assert!(store.list().unwrap().is_empty());
}

#[test]
fn load_decodes_null_entries_and_folded_keys() {
    let temp_dir = TempDir::new().unwrap();
    let store = store_in(&temp_dir);
    fs::write(
        store.path(),
        r#"[null,{"Id":"2","EMAIL":"c@d.com","Age":41,"email":null}]"#,
    )
    .unwrap();

    let records = store.load().unwrap().into_inner();
    assert_eq!(
        records,
        vec![Record::default(), Record::new("2", "c@d.com", 41)]
    );
}
