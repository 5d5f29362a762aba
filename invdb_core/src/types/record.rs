use crate::error::{EntryError, Result};

/// Values entered for one row, in column order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingRecord {
    fields: Vec<(String, String)>,
}

impl PendingRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.fields.push((column.into(), value.into()));
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(c, _)| c == column)
            .map(|(_, v)| v.as_str())
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(c, _)| c.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// True when the record holds exactly `columns`, in that order.
    pub fn matches_columns(&self, columns: &[String]) -> bool {
        self.fields.len() == columns.len()
            && self.fields.iter().zip(columns).all(|((c, _), want)| c == want)
    }
}

impl<C: Into<String>, V: Into<String>> FromIterator<(C, V)> for PendingRecord {
    fn from_iter<I: IntoIterator<Item = (C, V)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(|(c, v)| (c.into(), v.into())).collect(),
        }
    }
}

/// Records bound for the same table and column list, settled as one unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedBatch {
    table: String,
    columns: Vec<String>,
    records: Vec<PendingRecord>,
}

impl StagedBatch {
    /// Builds a batch, rejecting empty batches and records whose columns differ
    /// from `columns`.
    pub fn new(
        table: impl Into<String>,
        columns: Vec<String>,
        records: Vec<PendingRecord>,
    ) -> Result<Self> {
        let table = table.into();
        if columns.is_empty() {
            return Err(EntryError::NoColumns(table));
        }
        if records.is_empty() {
            return Err(EntryError::EmptyBatch(table));
        }
        for (index, record) in records.iter().enumerate() {
            if !record.matches_columns(&columns) {
                return Err(EntryError::MismatchedRecord {
                    index,
                    expected: columns.join(","),
                    found: record.columns().collect::<Vec<_>>().join(","),
                });
            }
        }
        Ok(Self {
            table,
            columns,
            records,
        })
    }

    pub fn single(
        table: impl Into<String>,
        columns: Vec<String>,
        record: PendingRecord,
    ) -> Result<Self> {
        Self::new(table, columns, vec![record])
    }

    /// Expands one key value against every combination of the expansion
    /// columns' values.
    ///
    /// The column list is the key column followed by the expansion columns.
    /// Records are produced with the first expansion varying slowest, so
    /// `("GameID", "G1")` against `ContentType = [Box, Manual]` and
    /// `Condition = [New, Used]` yields `G1/Box/New, G1/Box/Used,
    /// G1/Manual/New, G1/Manual/Used`.
    pub fn cartesian(
        table: impl Into<String>,
        key_column: &str,
        key_value: &str,
        expansions: &[(String, Vec<String>)],
    ) -> Result<Self> {
        let mut columns = vec![key_column.to_string()];
        columns.extend(expansions.iter().map(|(column, _)| column.clone()));

        let mut partial: Vec<Vec<&str>> = vec![vec![key_value]];
        for (_, values) in expansions {
            partial = partial
                .iter()
                .flat_map(|prefix| {
                    values.iter().map(move |v| {
                        let mut next = prefix.clone();
                        next.push(v.as_str());
                        next
                    })
                })
                .collect();
        }

        let records = partial
            .into_iter()
            .map(|values| columns.iter().cloned().zip(values).collect())
            .collect();
        Self::new(table, columns, records)
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn records(&self) -> &[PendingRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
