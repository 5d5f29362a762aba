use rusqlite::{Connection, params};

use crate::error::Result;
use crate::storage::schema::TableSchema;
use crate::types::Row;
use crate::types::value::Value;

/// Quotes an identifier for splicing into statement text.
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Reference check: does `table.column` hold exactly `value`?
///
/// Comparison is the store's `=` under the column's collation; no trimming or
/// case folding happens here.
pub fn reference_exists(conn: &Connection, table: &str, column: &str, value: &str) -> Result<bool> {
    let sql = format!(
        "SELECT COUNT(*) FROM {} WHERE {} = ?1",
        quote_ident(table),
        quote_ident(column)
    );
    let count: i64 = conn.query_row(&sql, params![value], |row| row.get(0))?;
    Ok(count > 0)
}

/// Every value of one column, in storage order.
pub fn column_values(conn: &Connection, table: &str, column: &str) -> Result<Vec<Value>> {
    let sql = format!("SELECT {} FROM {}", quote_ident(column), quote_ident(table));
    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query([])?;
    let mut out = Vec::new();
    while let Some(row) = rows.next()? {
        out.push(Value::from(row.get_ref(0)?));
    }
    Ok(out)
}

/// Non-null values of one column rendered as entry text.
pub fn column_entries(conn: &Connection, table: &str, column: &str) -> Result<Vec<String>> {
    Ok(column_values(conn, table, column)?
        .iter()
        .filter_map(Value::as_entry_text)
        .collect())
}

/// Primary key columns followed by `columns`, without repeats.
pub fn preview_columns(schema: &TableSchema, columns: &[String]) -> Vec<String> {
    let mut shown = schema.primary_key.clone();
    for c in columns {
        if !shown.contains(c) {
            shown.push(c.clone());
        }
    }
    shown
}

/// The newest `limit` rows of the table, oldest first.
///
/// Recency follows the rowid where the table has one, else the primary key.
/// Run this on an open transaction to see its uncommitted writes.
pub fn recent_rows(
    conn: &Connection,
    schema: &TableSchema,
    columns: &[String],
    limit: usize,
) -> Result<(Vec<String>, Vec<Row>)> {
    let shown = preview_columns(schema, columns);
    let select_list = shown
        .iter()
        .map(|c| quote_ident(c))
        .collect::<Vec<_>>()
        .join(", ");

    let order = if schema.has_rowid {
        " ORDER BY rowid DESC".to_string()
    } else if !schema.primary_key.is_empty() {
        let keys = schema
            .primary_key
            .iter()
            .map(|c| format!("{} DESC", quote_ident(c)))
            .collect::<Vec<_>>()
            .join(", ");
        format!(" ORDER BY {keys}")
    } else {
        String::new()
    };

    let sql = format!(
        "SELECT {} FROM {}{} LIMIT ?1",
        select_list,
        quote_ident(&schema.table),
        order
    );
    let mut stmt = conn.prepare(&sql)?;
    // SQLite reads a negative LIMIT as unbounded.
    let limit = i64::try_from(limit).unwrap_or(i64::MAX);
    let mut rows = stmt.query(params![limit])?;
    let mut out: Vec<Row> = Vec::new();
    while let Some(row) = rows.next()? {
        let mut values = Vec::with_capacity(shown.len());
        for i in 0..shown.len() {
            values.push(Value::from(row.get_ref(i)?));
        }
        out.push(values);
    }
    out.reverse();
    Ok((shown, out))
}

/// Row count, used by callers that need to confirm nothing was persisted.
pub fn count_rows(conn: &Connection, table: &str) -> Result<i64> {
    let sql = format!("SELECT COUNT(*) FROM {}", quote_ident(table));
    Ok(conn.query_row(&sql, [], |row| row.get(0))?)
}
