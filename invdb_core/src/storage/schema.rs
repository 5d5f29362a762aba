use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::error::{EntryError, Result};

/// The referenced side of a foreign key column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForeignKeyTarget {
    pub table: String,
    pub column: String,
}

impl ForeignKeyTarget {
    pub fn new(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            column: column.into(),
        }
    }
}

/// Constraint surface of one table, as reported by the store's catalog at
/// introspection time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TableSchema {
    pub table: String,
    /// Columns in declaration order.
    pub columns: Vec<String>,
    /// False for views and WITHOUT ROWID tables.
    pub has_rowid: bool,
    /// Primary key columns in key order; empty when the table declares none.
    pub primary_key: Vec<String>,
    pub foreign_keys: BTreeMap<String, ForeignKeyTarget>,
    pub unique_columns: BTreeSet<String>,
    pub not_null_columns: BTreeSet<String>,
}

impl TableSchema {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            ..Self::default()
        }
    }

    /// Leading primary key column, if any.
    pub fn primary_key_column(&self) -> Option<&str> {
        self.primary_key.first().map(String::as_str)
    }

    pub fn foreign_key(&self, column: &str) -> Option<&ForeignKeyTarget> {
        self.foreign_keys.get(column)
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    pub fn is_unique(&self, column: &str) -> bool {
        self.unique_columns.contains(column)
    }

    pub fn is_not_null(&self, column: &str) -> bool {
        self.not_null_columns.contains(column)
    }

    /// Checks that every requested column exists and returns them owned.
    pub fn require_columns<S: AsRef<str>>(&self, requested: &[S]) -> Result<Vec<String>> {
        if requested.is_empty() {
            return Err(EntryError::NoColumns(self.table.clone()));
        }
        requested
            .iter()
            .map(|c| {
                let c = c.as_ref();
                if self.has_column(c) {
                    Ok(c.to_string())
                } else {
                    Err(EntryError::unknown_column(&self.table, c))
                }
            })
            .collect()
    }
}
