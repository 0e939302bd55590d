mod cli;
mod datastore;
mod error;

pub use cli::{normalize_args, perform, Arguments, Operation};
pub use datastore::{JsonFileStore, Operations, Record, RecordSet, RecordSetOperation};
pub use error::{Result, StoreError};
