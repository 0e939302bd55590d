use super::record::Record;
use super::recordset::{RecordSet, RecordSetOperation};
use super::Operations;
use crate::Result;
use std::io::Write;
use std::{
    fs::{self, File},
    io::{BufWriter, ErrorKind},
    path::{Path, PathBuf},
};
use tracing::{debug, info};

/// A JSON array of records kept in a single file. Every call reads the whole
/// file and mutations rewrite it in place.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> JsonFileStore {
        JsonFileStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing file, an empty file and a literal `null` all load as an
    /// empty set.
    pub fn load(&self) -> Result<RecordSet> {
        let data = match fs::read(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "store file missing, starting empty");
                return Ok(RecordSet::default());
            }
            Err(e) => return Err(e.into()),
        };
        if data.is_empty() {
            return Ok(RecordSet::default());
        }
        let records: Option<Vec<Record>> = serde_json::from_slice(&data)?;
        let records: RecordSet = records.unwrap_or_default().into();
        debug!(path = %self.path.display(), count = records.len(), "loaded records");
        Ok(records)
    }

    /// Overwrites the file with the full set. Not atomic: a crash mid-write
    /// can leave the file truncated.
    pub fn persist(&self, records: &RecordSet) -> Result<()> {
        let file = File::create(&self.path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, records)?;
        writer.flush()?;
        debug!(path = %self.path.display(), count = records.len(), "persisted records");
        Ok(())
    }
}

impl Operations for JsonFileStore {
    fn list(&self) -> Result<RecordSet> {
        self.load()
    }

    fn add(&self, record: Record) -> Result<RecordSetOperation> {
        let mut records = self.load()?;
        let id = record.id.clone();
        let operation = records.insert(record);
        match operation {
            RecordSetOperation::Inserted => {
                self.persist(&records)?;
                info!(%id, "record added");
            }
            _ => debug!(%id, "record already exists, store untouched"),
        }
        Ok(operation)
    }

    fn remove(&self, id: &str) -> Result<RecordSetOperation> {
        let mut records = self.load()?;
        let operation = records.remove(id);
        match operation {
            RecordSetOperation::Removed => {
                self.persist(&records)?;
                info!(%id, "record removed");
            }
            _ => debug!(%id, "record not found, store untouched"),
        }
        Ok(operation)
    }

    fn find_by_id(&self, id: &str) -> Result<Option<Record>> {
        Ok(self.load()?.find(id).cloned())
    }
}
