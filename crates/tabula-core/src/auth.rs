//! Login form validation

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The single account allowed to open the console
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Default for Credentials {
    fn default() -> Self {
        Self {
            username: "admin".to_string(),
            password: "password123".to_string(),
        }
    }
}

/// Validation failures on the login screen. None of them touch the disk.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoginError {
    #[error("Please fill in all fields.")]
    MissingField,

    #[error("Incorrect username or password.")]
    InvalidCredentials,

    #[error("The database name must end in {0}")]
    InvalidSuffix(String),

    #[error("The database name must not contain path separators.")]
    InvalidName,
}

/// Raw field contents as typed by the user
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub database: String,
}

impl LoginForm {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        database: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            database: database.into(),
        }
    }

    /// Validate the form and return the trimmed database file name.
    ///
    /// Checks run in a fixed order: empty fields, credentials, then the
    /// database name.
    pub fn validate(&self, expected: &Credentials, suffix: &str) -> Result<String, LoginError> {
        let username = self.username.trim();
        let password = self.password.trim();
        let database = self.database.trim();

        if username.is_empty() || password.is_empty() || database.is_empty() {
            return Err(LoginError::MissingField);
        }

        if username != expected.username || password != expected.password {
            tracing::warn!(username = %username, "rejected login attempt");
            return Err(LoginError::InvalidCredentials);
        }

        if !database.ends_with(suffix) {
            return Err(LoginError::InvalidSuffix(suffix.to_string()));
        }

        if database.contains(['/', '\\']) {
            return Err(LoginError::InvalidName);
        }

        Ok(database.to_string())
    }
}
