use crate::Result;
use serde::de::{self, Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single user entry.
///
/// Decoding is lenient: keys match case-insensitively, unknown keys are
/// ignored, and absent or `null` values leave the zero value in place. A
/// `null` record decodes as the zero record.
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    pub id: String,
    pub email: String,
    pub age: i64,
}

impl Record {
    pub fn new(id: impl Into<String>, email: impl Into<String>, age: i64) -> Self {
        Record {
            id: id.into(),
            email: email.into(),
            age,
        }
    }

    pub fn from_json(payload: &str) -> Result<Record> {
        Ok(serde_json::from_str(payload)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_option(NullableRecordVisitor)
    }
}

struct NullableRecordVisitor;

impl<'de> Visitor<'de> for NullableRecordVisitor {
    type Value = Record;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a record object or null")
    }

    fn visit_none<E: de::Error>(self) -> std::result::Result<Record, E> {
        Ok(Record::default())
    }

    fn visit_unit<E: de::Error>(self) -> std::result::Result<Record, E> {
        Ok(Record::default())
    }

    fn visit_some<D>(self, deserializer: D) -> std::result::Result<Record, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(RecordVisitor)
    }
}

struct RecordVisitor;

impl<'de> Visitor<'de> for RecordVisitor {
    type Value = Record;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a record object")
    }

    fn visit_map<A>(self, mut map: A) -> std::result::Result<Record, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut record = Record::default();
        // Repeated keys: the last non-null value wins.
        while let Some(key) = map.next_key::<String>()? {
            if key.eq_ignore_ascii_case("id") {
                if let Some(id) = map.next_value::<Option<String>>()? {
                    record.id = id;
                }
            } else if key.eq_ignore_ascii_case("email") {
                if let Some(email) = map.next_value::<Option<String>>()? {
                    record.email = email;
                }
            } else if key.eq_ignore_ascii_case("age") {
                if let Some(age) = map.next_value::<Option<i64>>()? {
                    record.age = age;
                }
            } else {
                map.next_value::<IgnoredAny>()?;
            }
        }
        Ok(record)
    }
}

#[test]
fn record_json_test() {
    let record = Record::from_json(r#"{"id":"1","email":"a@b.com","age":30}"#).unwrap();
    assert_eq!(record, Record::new("1", "a@b.com", 30));
    assert_eq!(
        record.to_json().unwrap(),
        r#"{"id":"1","email":"a@b.com","age":30}"#
    );

    let partial = Record::from_json(r#"{"id":"7","nickname":"x"}"#).unwrap();
    assert_eq!(partial, Record::new("7", "", 0));

    assert!(Record::from_json(r#"{"id":"1","age":"thirty"}"#).is_err());
    assert!(Record::from_json(r#"{"id":"1","age":30.5}"#).is_err());
    assert!(Record::from_json(r#"["1","a@b.com",30]"#).is_err());
    assert!(Record::from_json("{not json").is_err());
}

#[test]
fn record_keys_match_case_insensitively_test() {
    let record = Record::from_json(r#"{"ID":"1","Email":"a@b.com","AGE":30}"#).unwrap();
    assert_eq!(record, Record::new("1", "a@b.com", 30));

    let record = Record::from_json(r#"{"id":"1","Id":"2"}"#).unwrap();
    assert_eq!(record.id, "2");
}

#[test]
fn record_null_values_keep_zero_value_test() {
    let record = Record::from_json(r#"{"id":"1","email":null,"age":null}"#).unwrap();
    assert_eq!(record, Record::new("1", "", 0));

    let record = Record::from_json(r#"{"id":"1","id":null}"#).unwrap();
    assert_eq!(record.id, "1");

    assert_eq!(Record::from_json("null").unwrap(), Record::default());

    let records: Vec<Record> =
        serde_json::from_str(r#"[null,{"id":"2","email":"c@d.com","age":41}]"#).unwrap();
    assert_eq!(
        records,
        vec![Record::default(), Record::new("2", "c@d.com", 41)]
    );
}
