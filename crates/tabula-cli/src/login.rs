//! Login screen: credentials plus the database to open

use dialoguer::{Input, Password};
use std::io::ErrorKind;
use tabula_core::settings::DatabaseSettings;
use tabula_core::{LoginError, LoginForm, Settings, TabulaError};
use tabula_driver_sqlite::{SqliteDatabase, SqliteDriver};
use thiserror::Error;

use crate::notify::Notification;

/// Why a login attempt did not reach the console
#[derive(Debug, Error)]
pub enum LoginFailure {
    /// Rejected before any file access
    #[error(transparent)]
    Invalid(#[from] LoginError),

    /// The database file could not be opened or created
    #[error("Error connecting to the database: {0}")]
    Open(TabulaError),
}

impl LoginFailure {
    pub fn notification(&self) -> Notification {
        match self {
            LoginFailure::Invalid(LoginError::InvalidSuffix(_)) | LoginFailure::Open(_) => {
                Notification::long(self.to_string())
            }
            LoginFailure::Invalid(_) => Notification::short(self.to_string()),
        }
    }
}

/// Validate the form, then open (or create) the named database
pub fn attempt(form: &LoginForm, settings: &Settings) -> Result<SqliteDatabase, LoginFailure> {
    let name = form.validate(&settings.auth, &settings.database.required_suffix)?;

    std::fs::create_dir_all(&settings.database.directory)
        .map_err(|e| LoginFailure::Open(e.into()))?;

    let db = SqliteDriver::new()
        .connect(&settings.database_path(&name))
        .map_err(LoginFailure::Open)?;

    tracing::info!(database = %name, "login succeeded");
    Ok(db)
}

fn is_complete(form: &LoginForm) -> bool {
    [&form.username, &form.password, &form.database]
        .iter()
        .all(|field| !field.trim().is_empty())
}

/// Show the login screen until a database is open.
///
/// A form fully supplied on the command line gets a single attempt. Returns
/// `None` when the user leaves with Ctrl-C or end of input.
pub fn run(settings: &Settings, prefill: LoginForm) -> anyhow::Result<Option<SqliteDatabase>> {
    if is_complete(&prefill) {
        return match attempt(&prefill, settings) {
            Ok(db) => {
                announce(&prefill);
                Ok(Some(db))
            }
            Err(e) => Err(e.into()),
        };
    }

    let mut form = prefill;

    println!("Log in to open a database");
    loop {
        println!("{}", available_databases(&settings.database));

        let Some(next) = prompt_form(&form)? else {
            return Ok(None);
        };
        form = next;

        match attempt(&form, settings) {
            Ok(db) => {
                announce(&form);
                return Ok(Some(db));
            }
            Err(e) => e.notification().show(),
        }
    }
}

fn announce(form: &LoginForm) {
    Notification::short(format!(
        "Connection to database '{}' successful.",
        form.database.trim()
    ))
    .show();
}

/// The database files that can be opened, re-read on every call
pub fn available_databases(settings: &DatabaseSettings) -> String {
    match SqliteDriver::new().list_databases(&settings.directory, &settings.required_suffix) {
        Ok(names) if names.is_empty() => format!(
            "No databases in {} yet; name one to create it.",
            settings.directory.display()
        ),
        Ok(names) => format!("Databases: {}", names.join(", ")),
        Err(e) => {
            tracing::warn!(error = %e, dir = %settings.directory.display(), "failed to list databases");
            format!("Could not list databases: {e}")
        }
    }
}

/// Ctrl-C and end of input leave the prompt without an error
fn cancelled(result: dialoguer::Result<String>) -> anyhow::Result<Option<String>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(dialoguer::Error::IO(e))
            if matches!(e.kind(), ErrorKind::Interrupted | ErrorKind::UnexpectedEof) =>
        {
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

/// Prompt for every field. The username and database name start from their
/// previous values; the password is masked and always typed again.
fn prompt_form(current: &LoginForm) -> anyhow::Result<Option<LoginForm>> {
    let text = |prompt: &str, initial: &str| {
        cancelled(
            Input::<String>::new()
                .with_prompt(prompt)
                .with_initial_text(initial)
                .allow_empty(true)
                .interact_text(),
        )
    };

    let Some(username) = text("Username", &current.username)? else {
        return Ok(None);
    };
    let Some(password) = cancelled(
        Password::new()
            .with_prompt("Password")
            .allow_empty_password(true)
            .interact(),
    )?
    else {
        return Ok(None);
    };
    let Some(database) = text("Database name", &current.database)? else {
        return Ok(None);
    };

    Ok(Some(LoginForm::new(username, password, database)))
}
