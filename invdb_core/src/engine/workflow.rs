use rusqlite::Connection;
use tracing::debug;

use crate::Session;
use crate::console::Terminal;
use crate::engine::preview::{PreviewMode, display_table};
use crate::engine::staged::{CommitDecision, insert_staged};
use crate::error::{EntryError, Result};
use crate::storage::catalog::introspect;
use crate::storage::query::{column_entries, column_values, reference_exists};
use crate::storage::schema::{ForeignKeyTarget, TableSchema};
use crate::types::{PendingRecord, StagedBatch};

/// Interactive entry loop for one table.
///
/// Introspects `table` once, then repeatedly collects a record for `columns`,
/// stages it, and asks whether to add another. Returns when the operator says
/// no. Catalog failures and unknown columns abort before the first prompt.
pub fn create_entry<T: Terminal, S: AsRef<str>>(
    session: &mut Session,
    terminal: &mut T,
    table: &str,
    columns: &[S],
) -> Result<()> {
    let schema = introspect(session.connection(), table)?;
    let columns = schema.require_columns(columns)?;

    loop {
        terminal.clear_screen()?;
        if terminal.confirm(&format!("Show existing {} entries?", schema.table))? {
            display_table(
                session.connection(),
                terminal,
                &schema,
                &columns,
                PreviewMode::Committed,
                session.preview_limit(),
            )?;
        }

        let record = collect_record(session.connection(), terminal, &schema, &columns)?;
        let batch = StagedBatch::single(schema.table.clone(), columns.clone(), record)?;
        let decision = insert_staged(session, terminal, &schema, &batch)?;
        debug!(table = %schema.table, state = ?decision.state(), "entry settled");

        if !terminal.confirm(&format!("Add another {} entry?", schema.table))? {
            terminal.clear_screen()?;
            return Ok(());
        }
    }
}

/// Collects one value per column, in order.
pub fn collect_record<T: Terminal>(
    conn: &Connection,
    terminal: &mut T,
    schema: &TableSchema,
    columns: &[String],
) -> Result<PendingRecord> {
    let mut record = PendingRecord::new();
    for column in columns {
        let value = collect_value(conn, terminal, schema, column)?;
        record.push(column.clone(), value);
    }
    Ok(record)
}

/// Prompts for one column.
///
/// Foreign key columns show the referenced column's contents first and keep
/// prompting until the value exists there. There is no retry limit; closing
/// input ends the loop with `InputClosed`.
///
/// Members of a multi-column foreign key are checked one column at a time, so
/// a combination the parent table lacks passes here and is rejected by the
/// store at insert time as a foreign key violation.
pub fn collect_value<T: Terminal>(
    conn: &Connection,
    terminal: &mut T,
    schema: &TableSchema,
    column: &str,
) -> Result<String> {
    let prompt = format!("Enter the {column}");
    let Some(target) = schema.foreign_key(column) else {
        return terminal.prompt(&prompt);
    };

    show_reference_values(conn, terminal, target)?;
    loop {
        let value = terminal.prompt(&prompt)?;
        if reference_exists(conn, &target.table, &target.column, &value)? {
            return Ok(value);
        }
        debug!(column, value = %value, target = %target.table, "rejected reference");
        terminal.notify(&format!(
            "'{}' is not a valid {}.{}. Enter one of the values shown above.",
            value, target.table, target.column
        ))?;
    }
}

fn show_reference_values<T: Terminal>(
    conn: &Connection,
    terminal: &mut T,
    target: &ForeignKeyTarget,
) -> Result<()> {
    let values = column_values(conn, &target.table, &target.column)?;
    terminal.notify(&format!("Valid {}.{} values:\n", target.table, target.column))?;
    if values.is_empty() {
        return terminal.notify("No entries found.\n");
    }
    let rows: Vec<_> = values.into_iter().map(|v| vec![v]).collect();
    terminal.present(std::slice::from_ref(&target.column), &rows)?;
    terminal.notify("")
}

/// One expansion column of a batch, with the table column its values come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expansion {
    pub column: String,
    pub source: ForeignKeyTarget,
}

impl Expansion {
    pub fn new(column: impl Into<String>, source: ForeignKeyTarget) -> Self {
        Self {
            column: column.into(),
            source,
        }
    }
}

/// A generated batch: one operator-entered key crossed with every combination
/// of the expansion sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchPlan {
    pub table: String,
    pub key_column: String,
    pub expansions: Vec<Expansion>,
}

impl BatchPlan {
    pub fn new(
        table: impl Into<String>,
        key_column: impl Into<String>,
        expansions: Vec<Expansion>,
    ) -> Self {
        Self {
            table: table.into(),
            key_column: key_column.into(),
            expansions,
        }
    }

    pub fn columns(&self) -> Vec<String> {
        let mut columns = vec![self.key_column.clone()];
        columns.extend(self.expansions.iter().map(|e| e.column.clone()));
        columns
    }

    /// Reads the expansion sources and builds the batch for `key`.
    pub fn expand(&self, conn: &Connection, key: &str) -> Result<StagedBatch> {
        let mut expansions = Vec::with_capacity(self.expansions.len());
        for e in &self.expansions {
            let values = column_entries(conn, &e.source.table, &e.source.column)?;
            expansions.push((e.column.clone(), values));
        }
        StagedBatch::cartesian(self.table.clone(), &self.key_column, key, &expansions)
    }
}

/// Interactive loop for generated batches.
///
/// The key goes through the same validated collection as manual entry; the
/// whole expansion is then staged and settled as one transaction.
pub fn create_batch_entry<T: Terminal>(
    session: &mut Session,
    terminal: &mut T,
    plan: &BatchPlan,
) -> Result<()> {
    let schema = introspect(session.connection(), &plan.table)?;
    schema.require_columns(plan.columns().as_slice())?;

    loop {
        terminal.clear_screen()?;
        let key = collect_value(session.connection(), terminal, &schema, &plan.key_column)?;

        match plan.expand(session.connection(), &key) {
            Ok(batch) => {
                let decision = insert_staged(session, terminal, &schema, &batch)?;
                if let CommitDecision::Committed { rows } = decision {
                    debug!(table = %schema.table, rows, key = %key, "batch committed");
                }
            }
            Err(EntryError::EmptyBatch(table)) => {
                let sources = plan
                    .expansions
                    .iter()
                    .map(|e| format!("{}.{}", e.source.table, e.source.column))
                    .collect::<Vec<_>>()
                    .join(", ");
                terminal.pause(Some(&format!(
                    "Nothing to insert into {table}: no values found in {sources}\n"
                )))?;
            }
            Err(other) => return Err(other),
        }

        if !terminal.confirm(&format!("Add another {} batch?", schema.table))? {
            terminal.clear_screen()?;
            return Ok(());
        }
    }
}

/// Shows the newest rows of a table outside any entry loop.
pub fn show_entries<T: Terminal, S: AsRef<str>>(
    session: &Session,
    terminal: &mut T,
    table: &str,
    columns: &[S],
) -> Result<()> {
    let schema = introspect(session.connection(), table)?;
    let columns = schema.require_columns(columns)?;
    terminal.clear_screen()?;
    display_table(
        session.connection(),
        terminal,
        &schema,
        &columns,
        PreviewMode::Committed,
        session.preview_limit(),
    )?;
    terminal.pause(None)?;
    terminal.clear_screen()
}

/// The introspected constraint surface of `table` as pretty JSON.
pub fn describe_table(session: &Session, table: &str) -> Result<String> {
    let schema = introspect(session.connection(), table)?;
    Ok(serde_json::to_string_pretty(&schema)?)
}
