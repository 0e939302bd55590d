use crate::Result;

/// The four operations a record store answers.
pub trait Operations {
    fn list(&self) -> Result<RecordSet>;
    fn add(&self, record: Record) -> Result<RecordSetOperation>;
    fn remove(&self, id: &str) -> Result<RecordSetOperation>;
    fn find_by_id(&self, id: &str) -> Result<Option<Record>>;
}

mod file;
mod record;
mod recordset;
pub use self::file::JsonFileStore;
pub use self::record::Record;
pub use self::recordset::{RecordSet, RecordSetOperation};
