//! Staged insert: write inside a transaction, preview, then let the operator
//! settle it.
//!
//! ```text
//! Idle -> Executing -> PreviewReady -> Committed
//!                                  \-> RolledBack
//!                   \-> Failed
//! ```
//!
//! A batch is one transaction. Whatever the outcome, nothing from a batch is
//! left half-applied.

use rusqlite::{Transaction, params_from_iter};
use tracing::{debug, error, info};

use crate::Session;
use crate::console::Terminal;
use crate::engine::classify::{Failure, classify};
use crate::engine::preview::{PreviewMode, display_table};
use crate::error::{EntryError, Result};
use crate::storage::query::quote_ident;
use crate::storage::schema::TableSchema;
use crate::types::StagedBatch;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertState {
    Idle,
    Executing,
    PreviewReady,
    Committed,
    RolledBack,
    Failed,
}

/// How a staged insert settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitDecision {
    Committed { rows: usize },
    RolledBack { rows: usize },
    Failed(Failure),
}

impl CommitDecision {
    pub fn state(&self) -> InsertState {
        match self {
            CommitDecision::Committed { .. } => InsertState::Committed,
            CommitDecision::RolledBack { .. } => InsertState::RolledBack,
            CommitDecision::Failed(_) => InsertState::Failed,
        }
    }
}

/// `INSERT INTO "t" ("a", "b") VALUES (?1, ?2)`
pub fn insert_statement(table: &str, columns: &[String]) -> String {
    let names = columns
        .iter()
        .map(|c| quote_ident(c))
        .collect::<Vec<_>>()
        .join(", ");
    let placeholders = (1..=columns.len())
        .map(|i| format!("?{i}"))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        quote_ident(table),
        names,
        placeholders
    )
}

/// Empty entries bind as NULL so declared NOT NULL columns reject them.
fn bind(value: &str) -> Option<&str> {
    (!value.is_empty()).then_some(value)
}

/// Writes `batch` in a fresh transaction, previews it and asks the operator to
/// commit or discard.
///
/// Constraint and store failures are rolled back, reported to the operator and
/// returned as `CommitDecision::Failed`. Only terminal errors (including the
/// operator closing input) come back as `Err`; the transaction is rolled back
/// before they propagate.
pub fn insert_staged<T: Terminal>(
    session: &mut Session,
    terminal: &mut T,
    schema: &TableSchema,
    batch: &StagedBatch,
) -> Result<CommitDecision> {
    let limit = session.preview_limit();
    let table = batch.table();
    let rows = batch.len();
    let sql = insert_statement(table, batch.columns());

    let tx = session.connection_mut().transaction()?;
    debug!(table, rows, state = ?InsertState::Executing, "staging insert");

    if let Err(err) = execute_rows(&tx, &sql, batch) {
        return settle_failure(tx, terminal, table, &err);
    }

    debug!(table, rows, state = ?InsertState::PreviewReady, "insert staged");
    match display_table(&tx, terminal, schema, batch.columns(), PreviewMode::Uncommitted, limit) {
        Ok(()) => {}
        Err(EntryError::Store(err)) => return settle_failure(tx, terminal, table, &err),
        Err(other) => {
            tx.rollback()?;
            return Err(other);
        }
    }

    let commit = match terminal.confirm("Commit Entry?") {
        Ok(answer) => answer,
        Err(err) => {
            tx.rollback()?;
            return Err(err);
        }
    };

    if !commit {
        tx.rollback()?;
        info!(table, rows, "staged insert rolled back");
        terminal.pause(Some("Previous entry(s) discarded\n"))?;
        return Ok(CommitDecision::RolledBack { rows });
    }

    // A failed commit leaves SQLite to roll the transaction back on drop.
    if let Err(err) = tx.commit() {
        return report_failure(terminal, table, classify(&err));
    }
    info!(table, rows, "staged insert committed");
    terminal.pause(Some("Entry(s) committed.\n"))?;
    Ok(CommitDecision::Committed { rows })
}

fn execute_rows(tx: &Transaction<'_>, sql: &str, batch: &StagedBatch) -> rusqlite::Result<()> {
    let mut stmt = tx.prepare(sql)?;
    for record in batch.records() {
        stmt.execute(params_from_iter(record.values().map(bind)))?;
    }
    Ok(())
}

fn settle_failure<T: Terminal>(
    tx: Transaction<'_>,
    terminal: &mut T,
    table: &str,
    err: &rusqlite::Error,
) -> Result<CommitDecision> {
    tx.rollback()?;
    report_failure(terminal, table, classify(err))
}

fn report_failure<T: Terminal>(
    terminal: &mut T,
    table: &str,
    failure: Failure,
) -> Result<CommitDecision> {
    match &failure {
        Failure::Integrity(v) => {
            error!(table, kind = ?v.kind, "{}", v.raw_message);
        }
        Failure::Store(message) => {
            error!(table, "{}", message);
        }
    }
    terminal.pause(Some(&format!("{failure}\n")))?;
    Ok(CommitDecision::Failed(failure))
}
