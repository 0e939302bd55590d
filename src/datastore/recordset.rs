use super::record::Record;
use serde::{Deserialize, Serialize};

/// Ordered, in-memory view of a store. Order is insertion order and is kept
/// across load and persist.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct RecordSet {
    records: Vec<Record>,
}

#[derive(Debug, PartialEq, Eq)]
pub enum RecordSetOperation {
    Inserted,
    Exists,
    Removed,
    NotFound,
}

impl RecordSet {
    pub fn new(records: Vec<Record>) -> Self {
        RecordSet { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&Record> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn insert(&mut self, record: Record) -> RecordSetOperation {
        if self.find(&record.id).is_some() {
            return RecordSetOperation::Exists;
        }
        self.records.push(record);
        RecordSetOperation::Inserted
    }

    pub fn remove(&mut self, id: &str) -> RecordSetOperation {
        let before = self.records.len();
        self.records.retain(|r| r.id != id);
        if self.records.len() != before {
            RecordSetOperation::Removed
        } else {
            RecordSetOperation::NotFound
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.records.iter()
    }

    pub fn into_inner(self) -> Vec<Record> {
        self.records
    }
}

impl From<Vec<Record>> for RecordSet {
    fn from(records: Vec<Record>) -> Self {
        RecordSet::new(records)
    }
}

#[test]
fn recordset_test() {
    let mut records = RecordSet::default();
    let first = Record::new("1", "a@b.com", 30);
    assert_eq!(records.insert(first.clone()), RecordSetOperation::Inserted);

    let second = Record::new("2", "c@d.com", 41);
    assert_eq!(records.insert(second.clone()), RecordSetOperation::Inserted);

    let duplicate = Record::new("1", "other@b.com", 99);
    assert_eq!(records.insert(duplicate), RecordSetOperation::Exists);
    assert_eq!(records.len(), 2);
    assert_eq!(records.find("1").unwrap(), &first);

    assert_eq!(records.remove("3"), RecordSetOperation::NotFound);
    assert_eq!(records.len(), 2);

    assert_eq!(records.remove("1"), RecordSetOperation::Removed);
    assert_eq!(records.find("1"), None);
    assert_eq!(records.into_inner(), vec![second]);
}

#[test]
fn recordset_remove_drops_every_match_test() {
    // Out-of-band edits can leave duplicate ids behind.
    let mut records = RecordSet::new(vec![
        Record::new("1", "a@b.com", 30),
        Record::new("2", "c@d.com", 41),
        Record::new("1", "e@f.com", 52),
    ]);
    assert_eq!(records.find("1").unwrap().email, "a@b.com");
    assert_eq!(records.remove("1"), RecordSetOperation::Removed);
    assert_eq!(records.len(), 1);
}

#[test]
fn recordset_serializes_as_array_test() {
    let records = RecordSet::new(vec![Record::new("1", "a@b.com", 30)]);
    assert_eq!(
        serde_json::to_string(&records).unwrap(),
        r#"[{"id":"1","email":"a@b.com","age":30}]"#
    );
    assert_eq!(serde_json::to_string(&RecordSet::default()).unwrap(), "[]");
}
