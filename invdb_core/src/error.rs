use thiserror::Error;

pub type Result<T> = std::result::Result<T, EntryError>;

/// Errors raised by the entry engine.
///
/// Constraint violations during an insert are not errors at this level: the
/// staged insert settles them into a `CommitDecision::Failed`.
#[derive(Error, Debug)]
pub enum EntryError {
    #[error("Store error: {0}")]
    Store(#[from] rusqlite::Error),

    #[error("Table '{0}' does not exist")]
    UnknownTable(String),

    #[error("Table '{table}' has no column '{column}'")]
    UnknownColumn { table: String, column: String },

    #[error("No columns requested for '{0}'")]
    NoColumns(String),

    #[error("Record {index} has columns ({found}), expected ({expected})")]
    MismatchedRecord {
        index: usize,
        expected: String,
        found: String,
    },

    #[error("Nothing to insert into '{0}'")]
    EmptyBatch(String),

    /// The operator closed the input stream.
    #[error("Input closed")]
    InputClosed,

    #[error("Terminal I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl EntryError {
    pub fn unknown_column(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self::UnknownColumn {
            table: table.into(),
            column: column.into(),
        }
    }
}
