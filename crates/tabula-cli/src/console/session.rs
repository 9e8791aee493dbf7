//! Console state: the schema snapshot, the current result, and the status line

use std::sync::Arc;
use tabula_core::{Database, Execution, QueryResult, TableDescriptor};

use crate::notify::Notification;

pub const NO_RESULTS: &str = "No results to show.";
pub const EMPTY_RESULT: &str = "The query returned no results.";
pub const STATEMENT_OK: &str = "Query executed successfully.";
pub const EMPTY_QUERY: &str = "Please enter a SQL query.";

/// What the console shows after each submission
pub struct ConsoleSession {
    db: Arc<dyn Database>,
    tables: Vec<TableDescriptor>,
    result: QueryResult,
    /// Shown instead of the grid when there are no rows
    status: Option<String>,
    failed: bool,
}

impl ConsoleSession {
    /// Open a session and take the first schema snapshot
    pub async fn new(db: Arc<dyn Database>) -> Self {
        let mut session = Self {
            db,
            tables: Vec::new(),
            result: QueryResult::empty(),
            status: Some(NO_RESULTS.to_string()),
            failed: false,
        };
        session.refresh_tables().await;
        session
    }

    pub fn database(&self) -> &Arc<dyn Database> {
        &self.db
    }

    pub fn tables(&self) -> &[TableDescriptor] {
        &self.tables
    }

    pub fn result(&self) -> &QueryResult {
        &self.result
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Whether the last submission ended in an engine error
    pub fn failed(&self) -> bool {
        self.failed
    }

    /// Re-read every table and its columns
    pub async fn refresh_tables(&mut self) {
        self.tables = self.db.describe_tables().await;
    }

    /// Drop the current result and go back to the start-up state
    pub fn clear(&mut self) {
        self.failed = false;
        self.show_status(NO_RESULTS);
    }

    fn show_status(&mut self, message: impl Into<String>) {
        self.result = QueryResult::empty();
        self.status = Some(message.into());
    }

    /// Run one piece of SQL and update the session.
    ///
    /// Returns the notification to flash, if any. Errors clear the previous
    /// result and become the status line.
    pub async fn submit(&mut self, sql: &str) -> Option<Notification> {
        let sql = sql.trim();
        if sql.is_empty() {
            return Some(Notification::short(EMPTY_QUERY));
        }

        let outcome = self.db.run(sql).await;
        self.failed = outcome.is_err();
        match outcome {
            Ok(Execution::Rows(result)) => {
                if result.has_rows() {
                    self.result = result;
                    self.status = None;
                } else {
                    self.show_status(EMPTY_RESULT);
                }
                None
            }
            Ok(Execution::Statement {
                affected_rows,
                schema_changed,
            }) => {
                self.show_status(STATEMENT_OK);
                if schema_changed {
                    self.refresh_tables().await;
                }
                Some(Notification::short(format!(
                    "Query executed successfully (non-SELECT). Rows affected: {}",
                    affected_rows
                )))
            }
            Err(e) => {
                tracing::error!(error = %e, "SQL error");
                self.show_status(format!("Error: {}", e));
                Some(Notification::long(format!("Error executing query: {}", e)))
            }
        }
    }
}
