//! Values exchanged with the storage connector.

use crate::StorageError;

/// A single statement parameter or column value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scalar {
    Null,
    Int(i64),
    Text(String),
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// A result row, columns kept in the order the engine returned them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    columns: Vec<(String, Scalar)>,
}

impl Row {
    pub fn new(columns: Vec<(String, Scalar)>) -> Self {
        Self { columns }
    }

    /// Value of the named column, if present
    pub fn get(&self, column: &str) -> Option<&Scalar> {
        self.columns
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(column))
            .map(|(_, value)| value)
    }

    /// Integer value of the named column.
    pub fn int(&self, column: &str) -> Result<i64, StorageError> {
        match self.get(column) {
            Some(Scalar::Int(value)) => Ok(*value),
            _ => Err(StorageError::MissingColumn(column.to_string())),
        }
    }

    /// Text value of the named column.
    pub fn text(&self, column: &str) -> Result<String, StorageError> {
        match self.get(column) {
            Some(Scalar::Text(value)) => Ok(value.clone()),
            _ => Err(StorageError::MissingColumn(column.to_string())),
        }
    }

    /// Value of the first column
    pub fn first(&self) -> Option<&Scalar> {
        self.columns.first().map(|(_, value)| value)
    }
}

/// Metadata reported by a write statement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Mutation {
    pub affected_rows: u64,
    pub inserted_id: Option<i64>,
}

/// What a statement produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Rows(Vec<Row>),
    Mutation(Mutation),
}

impl Outcome {
    /// Rows of a read.
    pub fn into_rows(self) -> Result<Vec<Row>, StorageError> {
        match self {
            Outcome::Rows(rows) => Ok(rows),
            Outcome::Mutation(_) => Err(StorageError::UnexpectedOutcome { expected: "rows" }),
        }
    }

    /// Metadata of a write.
    pub fn into_mutation(self) -> Result<Mutation, StorageError> {
        match self {
            Outcome::Mutation(mutation) => Ok(mutation),
            Outcome::Rows(_) => Err(StorageError::UnexpectedOutcome {
                expected: "mutation",
            }),
        }
    }
}
