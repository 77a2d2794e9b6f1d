use thiserror::Error;

/// Failures raised by the storage connector.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("unsupported database url scheme '{0}'")]
    UnsupportedUrl(String),

    #[error("failed to connect to database: {0}")]
    Connect(#[source] sqlx::Error),

    #[error("statement rejected by database: {0}")]
    Statement(#[from] sqlx::Error),

    #[error("column '{column}' holds a value of an unsupported type")]
    Decode { column: String },

    #[error("column '{0}' is missing or has an unexpected type")]
    MissingColumn(String),

    #[error("database did not report an inserted id")]
    MissingInsertId,

    #[error("statement did not produce {expected}")]
    UnexpectedOutcome { expected: &'static str },
}
