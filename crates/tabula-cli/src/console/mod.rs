//! Interactive SQL console
//!
//! Each line is either a dot-command or SQL handed to the session:
//!
//! ```text
//! .tables             Re-read and list tables with their columns
//! .databases          List the database files that can be opened
//! .clear              Clear the current result
//! .help               Show help
//! .quit / .exit       Leave the console
//! <sql>               Execute a statement
//! ```

mod session;

pub use session::ConsoleSession;

use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::{Config, Editor};
use tabula_core::settings::{ConsoleSettings, DatabaseSettings, Striping};

use crate::login::available_databases;
use crate::render;

const HELP: &str = "\
Enter a SQL statement and press Enter to run it.
  .tables          List tables and their columns
  .databases       List database files in the database directory
  .clear           Clear the current result
  .help            Show this help
  .quit, .exit     Leave the console";

/// A line of console input
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Tables,
    Databases,
    Clear,
    Help,
    Exit,
    Sql(String),
    Unknown(String),
}

impl Command {
    fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        if !trimmed.starts_with('.') {
            return Command::Sql(trimmed.to_string());
        }

        match trimmed.to_lowercase().as_str() {
            ".tables" | ".schema" => Command::Tables,
            ".databases" => Command::Databases,
            ".clear" => Command::Clear,
            ".help" | ".h" => Command::Help,
            ".quit" | ".exit" | ".q" => Command::Exit,
            _ => Command::Unknown(trimmed.to_string()),
        }
    }
}

pub struct Console {
    session: ConsoleSession,
    editor: Editor<(), DefaultHistory>,
    settings: ConsoleSettings,
    databases: DatabaseSettings,
}

impl Console {
    pub fn new(
        session: ConsoleSession,
        settings: ConsoleSettings,
        databases: DatabaseSettings,
    ) -> anyhow::Result<Self> {
        let config = Config::builder()
            .max_history_size(settings.max_history)?
            .auto_add_history(false)
            .build();
        let mut editor = Editor::with_config(config)?;

        if let Some(path) = &settings.history_file {
            // First run has no history yet
            if let Err(e) = editor.load_history(path) {
                tracing::debug!(error = %e, path = %path.display(), "no console history loaded");
            }
        }

        Ok(Self {
            session,
            editor,
            settings,
            databases,
        })
    }

    fn prompt(&self) -> String {
        format!("{}> ", self.session.database().display_name())
    }

    fn print_state(&self) {
        match self.session.status() {
            Some(status) => println!("{status}"),
            None => println!(
                "{}",
                render::render_result(self.session.result(), self.settings.striping)
            ),
        }
    }

    /// Read, execute, print until `.quit` or end of input
    pub async fn run(&mut self) -> anyhow::Result<()> {
        println!("Connected to: {}", self.session.database().display_name());
        println!("{}\n", render::render_schema(self.session.tables()));
        println!("{HELP}\n");

        loop {
            let prompt = self.prompt();
            let line = match self.editor.readline(&prompt) {
                Ok(line) => line,
                Err(ReadlineError::Interrupted) => continue,
                Err(ReadlineError::Eof) => break,
                Err(e) => return Err(e.into()),
            };

            if !line.trim().is_empty() {
                let _ = self.editor.add_history_entry(line.as_str());
            }

            match Command::parse(&line) {
                Command::Exit => break,
                Command::Help => println!("{HELP}"),
                Command::Tables => {
                    self.session.refresh_tables().await;
                    println!("{}", render::render_schema(self.session.tables()));
                }
                Command::Databases => println!("{}", available_databases(&self.databases)),
                Command::Clear => {
                    self.session.clear();
                    self.print_state();
                }
                Command::Unknown(cmd) => println!("Unknown command: {cmd}. Type .help"),
                Command::Sql(sql) => {
                    let tables_before = self.session.tables().to_vec();
                    if let Some(note) = self.session.submit(&sql).await {
                        note.show();
                    }
                    if sql.is_empty() {
                        continue;
                    }
                    self.print_state();
                    if self.session.tables() != tables_before.as_slice() {
                        println!("\n{}", render::render_schema(self.session.tables()));
                    }
                }
            }
        }

        self.save_history();
        Ok(())
    }

    fn save_history(&mut self) {
        let Some(path) = &self.settings.history_file else {
            return;
        };
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        if let Err(e) = self.editor.save_history(path) {
            tracing::warn!(error = %e, path = %path.display(), "failed to save console history");
        }
    }
}

/// Run statements one after another without a prompt.
///
/// Stops at the first failing statement. Its engine message has already been
/// shown as a notification, so the returned error only says which one failed.
pub async fn run_batch(
    session: &mut ConsoleSession,
    statements: &[String],
    striping: Striping,
) -> anyhow::Result<()> {
    for (index, sql) in statements.iter().enumerate() {
        if let Some(note) = session.submit(sql).await {
            note.show();
        }
        if sql.trim().is_empty() {
            continue;
        }
        if session.failed() {
            anyhow::bail!("statement {} of {} failed", index + 1, statements.len());
        }
        match session.status() {
            Some(status) => println!("{status}"),
            None => println!("{}", render::render_result(session.result(), striping)),
        }
    }
    Ok(())
}
