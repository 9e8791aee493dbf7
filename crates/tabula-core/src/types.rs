//! Core types for Tabula

use serde::{Deserialize, Serialize};

/// A value read from a result row before it is coerced to text
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// NULL value
    Null,
    /// 64-bit signed integer
    Integer(i64),
    /// 64-bit floating point
    Real(f64),
    /// UTF-8 string
    Text(String),
    /// Binary data
    Blob(Vec<u8>),
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Integer(v) => write!(f, "{}", v),
            Value::Real(v) => f.write_str(&real_to_text(*v)),
            Value::Text(v) => write!(f, "{}", v),
            // Text stored in BLOB columns is common in hand-made databases
            Value::Blob(v) => match std::str::from_utf8(v) {
                Ok(s) => write!(f, "{}", s),
                Err(_) => write!(f, "<{} bytes>", v.len()),
            },
        }
    }
}

/// Significant digits SQLite keeps when it turns a REAL into TEXT
const REAL_TEXT_DIGITS: i32 = 15;

/// Render a REAL the way SQLite's `CAST(x AS TEXT)` does (`%!.15g`).
///
/// Fifteen significant digits with trailing zeros trimmed, always at least one
/// digit after the decimal point, and scientific notation with a signed
/// two-digit exponent outside `1e-4 <= |x| < 1e15`.
pub fn real_to_text(v: f64) -> String {
    if v.is_nan() {
        return "NULL".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "Inf" } else { "-Inf" }.to_string();
    }

    // The exponent is taken after rounding to the kept digits, as `%g` does
    let scientific = format!("{:.*e}", (REAL_TEXT_DIGITS - 1) as usize, v);
    let (mantissa, exponent) = scientific
        .split_once('e')
        .unwrap_or((scientific.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < -4 || exponent >= REAL_TEXT_DIGITS {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", trim_fraction(mantissa), sign, exponent.abs())
    } else {
        let precision = (REAL_TEXT_DIGITS - 1 - exponent) as usize;
        trim_fraction(&format!("{:.*}", precision, v))
    }
}

/// Drop trailing zeros after the decimal point but keep one digit
fn trim_fraction(number: &str) -> String {
    if !number.contains('.') {
        return format!("{number}.0");
    }
    let trimmed = number.trim_end_matches('0');
    if trimmed.ends_with('.') {
        format!("{trimmed}0")
    } else {
        trimmed.to_string()
    }
}

/// Column metadata as reported by `PRAGMA table_info`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ColumnInfo {
    /// Column name
    pub name: String,
    /// Declared type, empty when the column was declared without one
    pub data_type: String,
}

impl ColumnInfo {
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
        }
    }
}

/// Snapshot of one table and its columns in declaration order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TableDescriptor {
    pub name: String,
    pub columns: Vec<ColumnInfo>,
}

/// Display-only projection of a read query.
///
/// Every cell is already text; NULL is the literal `"NULL"`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryResult {
    /// Column names in statement order
    pub headers: Vec<String>,
    /// Result rows, each as wide as `headers`
    pub rows: Vec<Vec<String>>,
}

impl QueryResult {
    /// Create a new empty query result
    pub fn empty() -> Self {
        Self::default()
    }

    /// Check if the result has rows
    pub fn has_rows(&self) -> bool {
        !self.rows.is_empty()
    }

    /// Get the number of columns
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Get the number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Append a row of engine values, coercing each to text
    pub fn push_values(&mut self, values: impl IntoIterator<Item = Value>) {
        self.rows
            .push(values.into_iter().map(|v| v.to_string()).collect());
    }
}

/// Outcome of running one piece of free-text SQL
#[derive(Debug, Clone, PartialEq)]
pub enum Execution {
    /// The read path produced a (possibly empty) result
    Rows(QueryResult),
    /// The mutate/DDL path completed without an engine error
    Statement {
        /// Rows changed by the last statement executed
        affected_rows: u64,
        /// The statement created or dropped a table
        schema_changed: bool,
    },
}
