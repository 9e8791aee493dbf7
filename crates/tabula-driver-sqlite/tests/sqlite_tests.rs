/// Integration tests for the SQLite driver
use pretty_assertions::assert_eq;
use std::path::PathBuf;
use tabula_core::{ColumnInfo, Database, Execution, QueryResult, TabulaError};
use tabula_driver_sqlite::{SqliteDatabase, SqliteDriver};
use tempfile::TempDir;

/// Helper to create a test database with sample data
async fn setup_test_database() -> (TempDir, SqliteDatabase) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let db = SqliteDriver::new()
        .connect(&dir.path().join("shop.db"))
        .expect("Failed to create test database");

    db.execute(
        r#"CREATE TABLE users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT NOT NULL,
            email TEXT,
            balance REAL DEFAULT 0.0
        );
        CREATE TABLE products (
            sku TEXT,
            price NUMERIC,
            notes
        );
        INSERT INTO users (username, email, balance) VALUES ('ana', 'ana@example.com', 10.5);
        INSERT INTO users (username, email, balance) VALUES ('luis', NULL, 0);"#,
    )
    .await
    .expect("Failed to setup schema");

    (dir, db)
}

#[tokio::test]
async fn test_connect_creates_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("new.db");
    assert!(!path.exists());

    let db = SqliteDriver::new().connect(&path).expect("connect");
    assert!(path.exists());
    assert_eq!(db.display_name(), "new.db");
    assert!(db.list_tables().await.is_empty());
}

#[tokio::test]
async fn test_connect_missing_parent_directory() {
    let dir = tempfile::tempdir().unwrap();
    let path: PathBuf = dir.path().join("missing").join("shop.db");

    let err = SqliteDriver::new().connect(&path).unwrap_err();
    assert!(matches!(err, TabulaError::Connection(_)));
    assert!(!path.exists());
}

#[tokio::test]
async fn test_connect_rejects_non_database_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.db");
    std::fs::write(&path, "not a database\n".repeat(512)).unwrap();

    let err = SqliteDriver::new().connect(&path).unwrap_err();
    assert!(matches!(err, TabulaError::Connection(_)));
}

#[tokio::test]
async fn test_list_tables_excludes_internal_tables() {
    let (_dir, db) = setup_test_database().await;

    // AUTOINCREMENT creates sqlite_sequence
    db.execute("CREATE TABLE android_metadata (locale TEXT)").await.unwrap();

    let mut tables = db.list_tables().await;
    tables.sort();
    assert_eq!(tables, vec!["products".to_string(), "users".to_string()]);
}

#[tokio::test]
async fn test_list_tables_on_broken_file_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("garbage.db");
    std::fs::write(&path, vec![0x42u8; 4096]).unwrap();

    let db = SqliteDatabase::new(&path);
    assert!(db.try_list_tables().await.is_err());
    assert!(db.list_tables().await.is_empty());
}

#[tokio::test]
async fn test_list_columns_in_declaration_order() {
    let (_dir, db) = setup_test_database().await;

    let columns = db.list_columns("users").await;
    assert_eq!(
        columns,
        vec![
            ColumnInfo::new("id", "INTEGER"),
            ColumnInfo::new("username", "TEXT"),
            ColumnInfo::new("email", "TEXT"),
            ColumnInfo::new("balance", "REAL"),
        ]
    );

    // Untyped columns report an empty declared type
    let columns = db.list_columns("products").await;
    assert_eq!(
        columns,
        vec![
            ColumnInfo::new("sku", "TEXT"),
            ColumnInfo::new("price", "NUMERIC"),
            ColumnInfo::new("notes", ""),
        ]
    );
}

#[tokio::test]
async fn test_list_columns_matches_pragma_order() {
    let (_dir, db) = setup_test_database().await;
    db.execute("ALTER TABLE users ADD COLUMN created_at TIMESTAMP").await.unwrap();

    let pragma = db.query("SELECT name FROM pragma_table_info('users')").await.unwrap();
    let expected: Vec<String> = pragma.rows.into_iter().map(|r| r[0].clone()).collect();
    let actual: Vec<String> = db.list_columns("users").await.into_iter().map(|c| c.name).collect();

    assert_eq!(actual, expected);
    assert_eq!(actual.last().map(String::as_str), Some("created_at"));
}

#[tokio::test]
async fn test_list_columns_quoted_and_missing_tables() {
    let (_dir, db) = setup_test_database().await;
    db.execute("CREATE TABLE \"it's\" (a INT)").await.unwrap();

    assert_eq!(db.list_columns("it's").await, vec![ColumnInfo::new("a", "INT")]);
    assert!(db.list_columns("no_such_table").await.is_empty());
}

#[tokio::test]
async fn test_describe_tables() {
    let (_dir, db) = setup_test_database().await;

    let mut tables = db.describe_tables().await;
    tables.sort_by(|a, b| a.name.cmp(&b.name));

    assert_eq!(tables.len(), 2);
    assert_eq!(tables[0].name, "products");
    assert_eq!(tables[0].columns.len(), 3);
    assert_eq!(tables[1].name, "users");
    assert_eq!(tables[1].columns[0], ColumnInfo::new("id", "INTEGER"));
}

#[tokio::test]
async fn test_query_normalizes_values_to_text() {
    let (_dir, db) = setup_test_database().await;

    let result = db
        .query("SELECT username, email, balance, id FROM users ORDER BY id")
        .await
        .unwrap();

    assert_eq!(
        result,
        QueryResult {
            headers: vec!["username".into(), "email".into(), "balance".into(), "id".into()],
            rows: vec![
                vec!["ana".into(), "ana@example.com".into(), "10.5".into(), "1".into()],
                vec!["luis".into(), "NULL".into(), "0.0".into(), "2".into()],
            ],
        }
    );
}

#[tokio::test]
async fn test_real_values_render_like_cast_to_text() {
    let (_dir, db) = setup_test_database().await;
    let values = ["10.0", "0.1 + 0.2", "1e20", "0.0", "-2.5", "1.5e-5", "123456.789", "2.0 / 3"];

    let select = format!("SELECT {}", values.join(", "));
    let cast = format!(
        "SELECT {}",
        values
            .iter()
            .map(|v| format!("CAST({v} AS TEXT)"))
            .collect::<Vec<_>>()
            .join(", ")
    );

    let rendered = db.query(&select).await.unwrap();
    let engine = db.query(&cast).await.unwrap();
    assert_eq!(rendered.rows, engine.rows);
    assert_eq!(rendered.rows[0][..4], ["10.0", "0.3", "1.0e+20", "0.0"]);
}

#[test]
fn test_list_databases_filters_by_suffix() {
    let dir = tempfile::tempdir().unwrap();
    for name in ["shop.db", "archive.db", "notes.txt", "backup.db-journal"] {
        std::fs::write(dir.path().join(name), b"").unwrap();
    }
    std::fs::create_dir(dir.path().join("folder.db")).unwrap();

    let names = SqliteDriver::new().list_databases(dir.path(), ".db").unwrap();
    assert_eq!(names, vec!["archive.db".to_string(), "shop.db".to_string()]);
}

#[test]
fn test_list_databases_missing_directory_is_empty() {
    let dir = tempfile::tempdir().unwrap();

    let names = SqliteDriver::new()
        .list_databases(&dir.path().join("missing"), ".db")
        .unwrap();
    assert!(names.is_empty());
}

#[tokio::test]
async fn test_query_with_no_rows_keeps_headers() {
    let (_dir, db) = setup_test_database().await;

    let result = db.query("SELECT id, username FROM users WHERE id < 0").await.unwrap();
    assert!(!result.has_rows());
    assert_eq!(result.headers, vec!["id".to_string(), "username".to_string()]);
}

#[tokio::test]
async fn test_missing_table_error_is_verbatim() {
    let (_dir, db) = setup_test_database().await;

    let err = db.run("SELECT * FROM missing_table").await.unwrap_err();
    assert!(matches!(err, TabulaError::Query(_)));
    assert!(
        err.to_string().contains("no such table: missing_table"),
        "unexpected error: {err}"
    );
}

#[tokio::test]
async fn test_run_select_takes_read_path() {
    let (_dir, db) = setup_test_database().await;

    match db.run("  select count(*) AS n from users  ").await.unwrap() {
        Execution::Rows(result) => {
            assert_eq!(result.headers, vec!["n".to_string()]);
            assert_eq!(result.rows, vec![vec!["2".to_string()]]);
        }
        other => panic!("expected rows, got {other:?}"),
    }
}

#[tokio::test]
async fn test_run_mutation_reports_affected_rows() {
    let (_dir, db) = setup_test_database().await;

    let outcome = db.run("UPDATE users SET balance = 1").await.unwrap();
    assert_eq!(
        outcome,
        Execution::Statement {
            affected_rows: 2,
            schema_changed: false,
        }
    );
}

#[tokio::test]
async fn test_create_and_drop_table_flag_schema_change() {
    let (_dir, db) = setup_test_database().await;

    let outcome = db.run("CREATE TABLE t(a INT)").await.unwrap();
    assert!(matches!(outcome, Execution::Statement { schema_changed: true, .. }));
    assert!(db.list_tables().await.contains(&"t".to_string()));

    let outcome = db.run("drop table t").await.unwrap();
    assert!(matches!(outcome, Execution::Statement { schema_changed: true, .. }));
    assert!(!db.list_tables().await.contains(&"t".to_string()));
}

#[tokio::test]
async fn test_changes_persist_across_handles() {
    let (dir, db) = setup_test_database().await;
    db.execute("INSERT INTO products (sku, price) VALUES ('A-1', 3)").await.unwrap();

    let reopened = SqliteDatabase::new(dir.path().join("shop.db"));
    let result = reopened.query("SELECT sku, price, notes FROM products").await.unwrap();
    assert_eq!(result.rows, vec![vec!["A-1".to_string(), "3".to_string(), "NULL".to_string()]]);
}
