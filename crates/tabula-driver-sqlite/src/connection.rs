//! SQLite database access

use async_trait::async_trait;
use rusqlite::{Connection as RusqliteConnection, OpenFlags};
use std::path::PathBuf;
use tabula_core::{ColumnInfo, Database, QueryResult, Result, TabulaError, Value};

const LIST_TABLES_SQL: &str = "SELECT name FROM sqlite_master \
     WHERE type = 'table' AND name NOT LIKE 'sqlite_%' AND name NOT LIKE 'android_metadata'";

const LIST_COLUMNS_SQL: &str = "SELECT name, type FROM pragma_table_info(?1) ORDER BY cid";

/// A SQLite file addressed by path.
///
/// No handle is kept: every operation opens the file, does its work, and
/// closes it again before returning.
#[derive(Debug, Clone)]
pub struct SqliteDatabase {
    path: PathBuf,
}

impl SqliteDatabase {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Open a fresh read-write handle, creating the file if absent
    pub(crate) fn open(&self) -> Result<RusqliteConnection> {
        let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_CREATE
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;

        RusqliteConnection::open_with_flags(&self.path, flags).map_err(|e| {
            TabulaError::Connection(format!(
                "Failed to open SQLite database at '{}': {}",
                self.path.display(),
                e
            ))
        })
    }

    /// Run `f` against a fresh handle and close it afterwards
    pub(crate) fn with_connection<T>(
        &self,
        f: impl FnOnce(&RusqliteConnection) -> Result<T>,
    ) -> Result<T> {
        let conn = self.open()?;
        let result = f(&conn);
        if let Err((_, e)) = conn.close() {
            tracing::warn!(error = %e, path = %self.path.display(), "failed to close SQLite handle");
        }
        result
    }
}

fn query_error(e: rusqlite::Error) -> TabulaError {
    TabulaError::Query(e.to_string())
}

#[async_trait]
impl Database for SqliteDatabase {
    fn display_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    #[tracing::instrument(skip(self), fields(path = %self.path.display()))]
    async fn try_list_tables(&self) -> Result<Vec<String>> {
        tracing::debug!("listing tables from sqlite_master");
        self.with_connection(|conn| {
            let mut stmt = conn.prepare(LIST_TABLES_SQL).map_err(query_error)?;
            let names = stmt
                .query_map([], |row| row.get::<_, String>(0))
                .map_err(query_error)?
                .collect::<rusqlite::Result<Vec<_>>>()
                .map_err(query_error)?;
            tracing::debug!(table_count = names.len(), "tables listed");
            Ok(names)
        })
    }

    #[tracing::instrument(skip(self), fields(path = %self.path.display()))]
    async fn try_list_columns(&self, table: &str) -> Result<Vec<ColumnInfo>> {
        tracing::trace!(table = %table, "fetching column information");
        self.with_connection(|conn| {
            let mut stmt = conn.prepare(LIST_COLUMNS_SQL).map_err(query_error)?;
            let columns = stmt
                .query_map([table], |row| {
                    Ok(ColumnInfo {
                        name: row.get(0)?,
                        data_type: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                    })
                })
                .map_err(query_error)?
                .collect::<rusqlite::Result<Vec<_>>>()
                .map_err(query_error)?;
            Ok(columns)
        })
    }

    #[tracing::instrument(skip(self, sql), fields(sql_preview = %sql.chars().take(100).collect::<String>()))]
    async fn query(&self, sql: &str) -> Result<QueryResult> {
        let start_time = std::time::Instant::now();

        let result = self.with_connection(|conn| {
            let mut stmt = conn.prepare(sql).map_err(query_error)?;
            let column_count = stmt.column_count();
            let mut result = QueryResult {
                headers: stmt.column_names().into_iter().map(String::from).collect(),
                rows: Vec::new(),
            };

            let mut rows = stmt.query([]).map_err(query_error)?;
            while let Some(row) = rows.next().map_err(query_error)? {
                let mut values = Vec::with_capacity(column_count);
                for i in 0..column_count {
                    values.push(row.get_ref(i).map(value_from_ref).map_err(query_error)?);
                }
                result.push_values(values);
            }
            Ok(result)
        })?;

        tracing::debug!(
            row_count = result.row_count(),
            execution_time_ms = start_time.elapsed().as_millis() as u64,
            "query executed successfully"
        );
        Ok(result)
    }

    #[tracing::instrument(skip(self, sql), fields(sql_preview = %sql.chars().take(100).collect::<String>()))]
    async fn execute(&self, sql: &str) -> Result<u64> {
        let affected_rows = self.with_connection(|conn| {
            conn.execute_batch(sql).map_err(query_error)?;
            Ok(conn.changes())
        })?;

        tracing::debug!(affected_rows, "statement executed");
        Ok(affected_rows)
    }
}

fn value_from_ref(value: rusqlite::types::ValueRef<'_>) -> Value {
    use rusqlite::types::ValueRef;

    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::Integer(i),
        ValueRef::Real(f) => Value::Real(f),
        ValueRef::Text(s) => Value::Text(String::from_utf8_lossy(s).into_owned()),
        ValueRef::Blob(b) => Value::Blob(b.to_vec()),
    }
}
