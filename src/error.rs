use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("-{0} flag has to be specified")]
    MissingFlag(&'static str),

    #[error("Operation {0} not allowed!")]
    OperationNotAllowed(String),

    #[error("Parsing error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IO(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;
