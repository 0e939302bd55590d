use super::args::{Arguments, FILE_NAME_FLAG, ID_FLAG, ITEM_FLAG, OPERATION_FLAG};
use crate::datastore::{JsonFileStore, Operations, Record, RecordSetOperation};
use crate::error::StoreError;
use crate::Result;
use std::io::Write;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    List,
    FindById,
    Remove,
}

impl FromStr for Operation {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "add" => Ok(Operation::Add),
            "list" => Ok(Operation::List),
            "findById" => Ok(Operation::FindById),
            "remove" => Ok(Operation::Remove),
            other => Err(StoreError::OperationNotAllowed(other.to_string())),
        }
    }
}

/// Runs the requested operation against the store named by `-fileName`,
/// writing results and diagnostics to `writer`.
pub fn perform<W: Write>(args: &Arguments, writer: &mut W) -> Result<()> {
    let operation = required(&args.operation, OPERATION_FLAG)?;
    let file_name = required(&args.file_name, FILE_NAME_FLAG)?;
    let store = JsonFileStore::new(file_name);

    match operation.parse::<Operation>()? {
        Operation::List => list_records(&store, writer),
        Operation::Add => {
            let item = required(&args.item, ITEM_FLAG)?;
            add_record(&store, item, writer)
        }
        Operation::Remove => {
            let id = required(&args.id, ID_FLAG)?;
            remove_record(&store, id, writer)
        }
        Operation::FindById => {
            let id = required(&args.id, ID_FLAG)?;
            find_record(&store, id, writer)
        }
    }
}

fn required<'a>(value: &'a Option<String>, flag: &'static str) -> Result<&'a str> {
    match value.as_deref() {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(StoreError::MissingFlag(flag)),
    }
}

fn list_records<S: Operations, W: Write>(store: &S, writer: &mut W) -> Result<()> {
    let records = store.list()?;
    if !records.is_empty() {
        serde_json::to_writer(&mut *writer, &records)?;
    }
    Ok(())
}

fn add_record<S: Operations, W: Write>(store: &S, item: &str, writer: &mut W) -> Result<()> {
    let record = Record::from_json(item)?;
    let id = record.id.clone();
    if store.add(record)? == RecordSetOperation::Exists {
        write!(writer, "Item with id {} already exists", id)?;
    }
    Ok(())
}

fn remove_record<S: Operations, W: Write>(store: &S, id: &str, writer: &mut W) -> Result<()> {
    if store.remove(id)? == RecordSetOperation::NotFound {
        write!(writer, "Item with id {} not found", id)?;
    }
    Ok(())
}

// No output when the id is absent, unlike remove.
fn find_record<S: Operations, W: Write>(store: &S, id: &str, writer: &mut W) -> Result<()> {
    if let Some(record) = store.find_by_id(id)? {
        writer.write_all(record.to_json()?.as_bytes())?;
    }
    Ok(())
}

#[cfg(test)]
fn arguments(operation: &str, file_name: &str) -> Arguments {
    Arguments {
        operation: Some(operation.to_string()),
        file_name: Some(file_name.to_string()),
        ..Arguments::default()
    }
}

#[test]
fn operation_from_str_test() {
    assert_eq!("add".parse::<Operation>().unwrap(), Operation::Add);
    assert_eq!("list".parse::<Operation>().unwrap(), Operation::List);
    assert_eq!("findById".parse::<Operation>().unwrap(), Operation::FindById);
    assert_eq!("remove".parse::<Operation>().unwrap(), Operation::Remove);
    assert_eq!(
        "findbyid".parse::<Operation>().unwrap_err().to_string(),
        "Operation findbyid not allowed!"
    );
}

#[test]
fn missing_flags_test() {
    let mut out = Vec::new();

    let err = perform(&Arguments::default(), &mut out).unwrap_err();
    assert_eq!(err.to_string(), "-operation flag has to be specified");

    let mut args = arguments("list", "");
    let err = perform(&args, &mut out).unwrap_err();
    assert_eq!(err.to_string(), "-fileName flag has to be specified");

    args.file_name = None;
    args.operation = Some("bogus".to_string());
    let err = perform(&args, &mut out).unwrap_err();
    assert_eq!(err.to_string(), "-fileName flag has to be specified");

    let err = perform(&arguments("add", "users.json"), &mut out).unwrap_err();
    assert_eq!(err.to_string(), "-item flag has to be specified");

    let err = perform(&arguments("remove", "users.json"), &mut out).unwrap_err();
    assert_eq!(err.to_string(), "-id flag has to be specified");

    let err = perform(&arguments("findById", "users.json"), &mut out).unwrap_err();
    assert_eq!(err.to_string(), "-id flag has to be specified");

    let err = perform(&arguments("drop", "users.json"), &mut out).unwrap_err();
    assert_eq!(err.to_string(), "Operation drop not allowed!");

    assert!(out.is_empty());
}
