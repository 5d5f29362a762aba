//! Schema introspection over SQLite's catalog.
//!
//! Every lookup binds the table name as a parameter to the table-valued pragma
//! functions, so no identifier is spliced into catalog SQL.

use rusqlite::{Connection, OptionalExtension, params};
use tracing::debug;

use crate::error::{EntryError, Result};
use crate::storage::schema::{ForeignKeyTarget, TableSchema};

/// Builds a fresh `TableSchema` for `table`.
///
/// Fails with `UnknownTable` when the catalog has no such table or view, and
/// propagates any catalog query failure unchanged.
pub fn introspect(conn: &Connection, table: &str) -> Result<TableSchema> {
    let (name, has_rowid) = lookup_table(conn, table)?
        .ok_or_else(|| EntryError::UnknownTable(table.to_string()))?;

    let mut schema = TableSchema::new(name);
    schema.has_rowid = has_rowid;
    load_columns(conn, &mut schema)?;
    load_foreign_keys(conn, &mut schema)?;
    load_unique_columns(conn, &mut schema)?;

    debug!(
        table = %schema.table,
        primary_key = ?schema.primary_key,
        foreign_keys = schema.foreign_keys.len(),
        unique = ?schema.unique_columns,
        not_null = ?schema.not_null_columns,
        "introspected table"
    );
    Ok(schema)
}

/// Returns the catalog spelling of the table name and whether rows carry a rowid.
fn lookup_table(conn: &Connection, table: &str) -> Result<Option<(String, bool)>> {
    let found = conn
        .query_row(
            "SELECT name, type, wr FROM pragma_table_list \
             WHERE schema = 'main' AND type IN ('table', 'view') AND name = ?1 COLLATE NOCASE",
            params![table],
            |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, bool>(2)?,
                ))
            },
        )
        .optional()?;

    Ok(found.map(|(name, kind, without_rowid)| (name, kind == "table" && !without_rowid)))
}

fn load_columns(conn: &Connection, schema: &mut TableSchema) -> Result<()> {
    let mut stmt =
        conn.prepare("SELECT name, \"notnull\", pk FROM pragma_table_info(?1) ORDER BY cid")?;
    let rows = stmt.query_map(params![schema.table], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, bool>(1)?,
            row.get::<_, i64>(2)?,
        ))
    })?;

    let mut keyed: Vec<(i64, String)> = Vec::new();
    for row in rows {
        let (name, not_null, pk_position) = row?;
        if not_null {
            schema.not_null_columns.insert(name.clone());
        }
        if pk_position > 0 {
            keyed.push((pk_position, name.clone()));
        }
        schema.columns.push(name);
    }
    keyed.sort_by_key(|(position, _)| *position);
    schema.primary_key = keyed.into_iter().map(|(_, name)| name).collect();
    Ok(())
}

fn load_foreign_keys(conn: &Connection, schema: &mut TableSchema) -> Result<()> {
    let mut stmt = conn.prepare(
        "SELECT \"from\", \"table\", \"to\", seq FROM pragma_foreign_key_list(?1) ORDER BY id, seq",
    )?;
    let rows = stmt.query_map(params![schema.table], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, Option<String>>(2)?,
            row.get::<_, i64>(3)?,
        ))
    })?;

    for row in rows {
        let (local, parent, target, seq) = row?;
        let column = match target {
            Some(column) => column,
            None => implicit_parent_column(conn, &parent, seq)?,
        };
        schema
            .foreign_keys
            .insert(local, ForeignKeyTarget::new(parent, column));
    }
    Ok(())
}

/// `REFERENCES parent` without a column list points at the parent's primary key.
fn implicit_parent_column(conn: &Connection, parent: &str, seq: i64) -> Result<String> {
    let column = conn
        .query_row(
            "SELECT name FROM pragma_table_info(?1) WHERE pk = ?2",
            params![parent, seq + 1],
            |row| row.get::<_, String>(0),
        )
        .optional()?;
    Ok(column.unwrap_or_else(|| "rowid".to_string()))
}

fn load_unique_columns(conn: &Connection, schema: &mut TableSchema) -> Result<()> {
    let mut list = conn.prepare("SELECT name FROM pragma_index_list(?1) WHERE \"unique\" = 1")?;
    let indexes = list
        .query_map(params![schema.table], |row| row.get::<_, String>(0))?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    let mut members = conn.prepare("SELECT name FROM pragma_index_info(?1) ORDER BY seqno")?;
    for index in indexes {
        let columns = members.query_map(params![index], |row| row.get::<_, Option<String>>(0))?;
        for column in columns {
            // Expression index members have no column name.
            if let Some(column) = column? {
                schema.unique_columns.insert(column);
            }
        }
    }
    Ok(())
}
