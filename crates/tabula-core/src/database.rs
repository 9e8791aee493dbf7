//! Database trait shared by the driver and the console

use crate::{ColumnInfo, Execution, QueryResult, Result, StatementKind, TableDescriptor};
use async_trait::async_trait;

/// A database the console can introspect and run SQL against.
///
/// Implementations open their own handle for every call; nothing is shared
/// between calls, so there is no transaction spanning two methods.
#[async_trait]
pub trait Database: Send + Sync {
    /// Human readable name of the database this instance points at
    fn display_name(&self) -> String;

    /// List user tables in catalog order
    async fn try_list_tables(&self) -> Result<Vec<String>>;

    /// List (name, declared type) pairs for a table in declaration order
    async fn try_list_columns(&self, table: &str) -> Result<Vec<ColumnInfo>>;

    /// Run a read statement and materialize every row as text
    async fn query(&self, sql: &str) -> Result<QueryResult>;

    /// Run a mutating or DDL statement, returning rows changed
    async fn execute(&self, sql: &str) -> Result<u64>;

    /// List user tables, logging and swallowing engine errors
    async fn list_tables(&self) -> Vec<String> {
        match self.try_list_tables().await {
            Ok(tables) => tables,
            Err(e) => {
                tracing::error!(error = %e, database = %self.display_name(), "error getting table names");
                Vec::new()
            }
        }
    }

    /// List columns of a table, logging and swallowing engine errors
    async fn list_columns(&self, table: &str) -> Vec<ColumnInfo> {
        match self.try_list_columns(table).await {
            Ok(columns) => columns,
            Err(e) => {
                tracing::error!(error = %e, table = %table, "error getting columns");
                Vec::new()
            }
        }
    }

    /// Snapshot every user table together with its columns
    async fn describe_tables(&self) -> Vec<TableDescriptor> {
        let mut tables = Vec::new();
        for name in self.list_tables().await {
            let columns = self.list_columns(&name).await;
            tables.push(TableDescriptor { name, columns });
        }
        tracing::debug!(table_count = tables.len(), "schema snapshot taken");
        tables
    }

    /// Classify free-text SQL and run it on the matching path
    async fn run(&self, sql: &str) -> Result<Execution> {
        let sql = sql.trim();
        match StatementKind::classify(sql) {
            StatementKind::Read => Ok(Execution::Rows(self.query(sql).await?)),
            StatementKind::Mutate { schema_change } => {
                let affected_rows = self.execute(sql).await?;
                Ok(Execution::Statement {
                    affected_rows,
                    schema_changed: schema_change,
                })
            }
        }
    }
}
