use rusqlite::Connection;

use crate::console::Terminal;
use crate::error::Result;
use crate::storage::query::recent_rows;
use crate::storage::schema::TableSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewMode {
    Committed,
    /// Shown from inside an open transaction, before the commit prompt.
    Uncommitted,
}

/// Shows the newest rows of `schema.table`: primary key columns, then `columns`.
pub fn display_table<T: Terminal>(
    conn: &Connection,
    terminal: &mut T,
    schema: &TableSchema,
    columns: &[String],
    mode: PreviewMode,
    limit: usize,
) -> Result<()> {
    let (shown, rows) = recent_rows(conn, schema, columns, limit)?;

    match mode {
        PreviewMode::Committed => terminal.notify(&format!("Displaying {}\n", schema.table))?,
        PreviewMode::Uncommitted => terminal.notify(&format!(
            "Displaying {} including uncommitted changes\n",
            schema.table
        ))?,
    }

    if rows.is_empty() {
        return terminal.notify("No entries found.\n");
    }
    terminal.present(&shown, &rows)?;
    terminal.notify("")
}
