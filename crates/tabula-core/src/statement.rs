//! Statement classification for free-text SQL

/// Which execution path a piece of SQL takes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    /// Starts with `SELECT`; run as a query and collect rows
    Read,
    /// Anything else; executed directly
    Mutate {
        /// Starts with `CREATE TABLE` or `DROP TABLE`
        schema_change: bool,
    },
}

impl StatementKind {
    /// Classify SQL by a case-insensitive prefix check.
    ///
    /// Leading whitespace is ignored; nothing past the prefix is inspected, so
    /// `WITH ... SELECT` and `PRAGMA` take the mutate path.
    pub fn classify(sql: &str) -> Self {
        let sql = sql.trim_start();
        if starts_with_ignore_case(sql, "SELECT") {
            StatementKind::Read
        } else {
            StatementKind::Mutate {
                schema_change: starts_with_ignore_case(sql, "CREATE TABLE")
                    || starts_with_ignore_case(sql, "DROP TABLE"),
            }
        }
    }
}

fn starts_with_ignore_case(s: &str, prefix: &str) -> bool {
    s.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}
