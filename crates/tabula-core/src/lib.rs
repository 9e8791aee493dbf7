//! Tabula Core - Core abstractions for the SQLite browser
//!
//! This crate provides the types and traits the driver and the CLI share:
//!
//! - `Database` - Trait for schema introspection and statement execution
//! - `StatementKind` - Read vs. mutate classification of free-text SQL
//! - `LoginForm` - Credential and database-name validation
//! - `Settings` - TOML-backed configuration
//! - Common types like `Value`, `QueryResult`, `TableDescriptor`

mod auth;
mod database;
mod error;
pub mod settings;
mod statement;
mod types;

pub use auth::*;
pub use database::*;
pub use error::*;
pub use settings::Settings;
pub use statement::*;
pub use types::*;
