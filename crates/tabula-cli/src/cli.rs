//! Tabula - browse and edit SQLite databases from the terminal
//!
//! Log in with the configured credentials, name a `.db` file, then inspect
//! its tables and run arbitrary SQL against it.

mod console;
mod logging;
mod login;
mod notify;
mod render;

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tabula_core::{LoginForm, Settings};

use crate::console::{Console, ConsoleSession};

#[derive(Parser, Debug)]
#[command(name = "tabula", version, about = "Browse and edit SQLite databases")]
struct Cli {
    /// Config file (defaults to <config dir>/tabula/config.toml)
    #[arg(long, env = "TABULA_CONFIG")]
    config: Option<PathBuf>,

    /// Directory database names are resolved against
    #[arg(long, env = "TABULA_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Login username
    #[arg(short, long)]
    username: Option<String>,

    /// Login password
    #[arg(short, long, env = "TABULA_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Database file name, e.g. shop.db
    #[arg(short, long)]
    database: Option<String>,

    /// Run SQL and exit instead of opening the console (repeatable)
    #[arg(short = 'e', long = "execute", value_name = "SQL")]
    execute: Vec<String>,
}

impl Cli {
    fn login_form(&self) -> LoginForm {
        LoginForm::new(
            self.username.clone().unwrap_or_default(),
            self.password.clone().unwrap_or_default(),
            self.database.clone().unwrap_or_default(),
        )
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::load(cli.config.as_deref()).context("Failed to load settings")?;
    if let Some(dir) = &cli.data_dir {
        settings.database.directory = dir.clone();
    }

    let _log_guard = logging::init(&logging::LoggingConfig::from(&settings.logging))
        .context("Failed to initialize logging")?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        database_dir = %settings.database.directory.display(),
        "Starting Tabula"
    );

    let Some(db) = login::run(&settings, cli.login_form())? else {
        return Ok(());
    };

    let mut session = ConsoleSession::new(Arc::new(db)).await;

    if !cli.execute.is_empty() {
        return console::run_batch(&mut session, &cli.execute, settings.console.striping).await;
    }

    let mut console = Console::new(session, settings.console.clone(), settings.database.clone())?;
    console.run().await?;

    tracing::info!("Tabula exiting");
    Ok(())
}
