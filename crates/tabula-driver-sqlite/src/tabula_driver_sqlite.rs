//! SQLite database access for Tabula

mod connection;
mod driver;

pub use connection::SqliteDatabase;
pub use driver::SqliteDriver;
