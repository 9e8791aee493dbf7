//! SQLite driver entry point

use std::path::Path;
use tabula_core::{Result, TabulaError};

use crate::SqliteDatabase;

/// SQLite database driver
#[derive(Debug, Default)]
pub struct SqliteDriver;

impl SqliteDriver {
    pub fn new() -> Self {
        Self
    }

    /// Open (or create) the database at `path` once to prove it is usable.
    ///
    /// The handle is closed before returning; the returned `SqliteDatabase`
    /// reopens the file for every later operation.
    #[tracing::instrument(skip(self), fields(path = %path.display()))]
    pub fn connect(&self, path: &Path) -> Result<SqliteDatabase> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if !parent.exists() {
                return Err(TabulaError::Connection(format!(
                    "Parent directory does not exist: {}",
                    parent.display()
                )));
            }
        }

        let database = SqliteDatabase::new(path);
        database
            .with_connection(|conn| {
                // Reading the header rejects files that are not databases
                conn.query_row("PRAGMA schema_version", [], |row| row.get::<_, i64>(0))
                    .map_err(|e| TabulaError::Connection(e.to_string()))
            })
            .inspect_err(|e| tracing::error!(error = %e, "failed to connect to SQLite database"))?;

        tracing::info!("SQLite database ready");
        Ok(database)
    }

    /// Names of the database files in `dir` that end in `suffix`, sorted.
    ///
    /// A directory that does not exist yet holds no databases.
    pub fn list_databases(&self, dir: &Path, suffix: &str) -> Result<Vec<String>> {
        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.ends_with(suffix) {
                names.push(name);
            }
        }
        names.sort();

        tracing::debug!(dir = %dir.display(), count = names.len(), "database files listed");
        Ok(names)
    }
}
