//! Terminal front end for the task list.
//!
//! # Responsibility
//! - Map subcommands onto `TaskListStore` operations.
//! - Provide the SQLite-backed storage and interactive confirmation.
//!
//! Indices are 1-based on the command line and 0-based in the store.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use dialoguer::Confirm;
use log::warn;
use std::path::PathBuf;
use std::process::ExitCode;
use tasklist_core::db::open_db;
use tasklist_core::{
    core_version, default_log_level, init_logging, ConfirmationPrompt, LoadStatus,
    MutationOutcome, RejectReason, SqliteKvStore, StoreConfig, TaskListStore, TASKS_STORAGE_KEY,
};

const DATA_DIR_NAME: &str = "tasklist";
const DB_FILE_NAME: &str = "tasklist.sqlite3";
const LOG_DIR_NAME: &str = "logs";

#[derive(Parser)]
#[command(name = "tasklist")]
#[command(about = "Dated to-do list", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// SQLite database file
    #[arg(long, global = true, env = "TASKLIST_DB")]
    db: Option<PathBuf>,

    /// Storage key the list lives under
    #[arg(long, global = true, env = "TASKLIST_KEY", default_value = TASKS_STORAGE_KEY)]
    key: String,

    /// Directory for rolling log files
    #[arg(long, global = true, env = "TASKLIST_LOG_DIR")]
    log_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error
    #[arg(long, global = true, env = "TASKLIST_LOG_LEVEL")]
    log_level: Option<String>,
}

#[derive(Subcommand)]
enum Command {
    /// Show all tasks
    List,
    /// Add a task
    Add {
        text: String,
        /// Due date, YYYY-MM-DD
        date: String,
    },
    /// Toggle a task between done and pending
    Done { index: usize },
    /// Replace a task's text and date
    Edit {
        index: usize,
        text: String,
        date: String,
    },
    /// Delete a task
    Delete {
        index: usize,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Mark every task done, or every task pending if all are done
    MarkAll,
    /// Delete every task
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Print the core version
    Version,
}

struct TerminalPrompt {
    assume_yes: bool,
}

impl ConfirmationPrompt for TerminalPrompt {
    fn confirm(&mut self, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        match Confirm::new().with_prompt(message).default(false).interact() {
            Ok(answer) => answer,
            Err(err) => {
                warn!("event=confirm module=cli status=error error={err}");
                false
            }
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    if let Command::Version = cli.command {
        println!("tasklist_core version={}", core_version());
        return Ok(());
    }

    start_logging(&cli);

    let db_path = match cli.db.clone() {
        Some(path) => path,
        None => data_path(DB_FILE_NAME).context("cannot resolve a data directory; pass --db")?,
    };
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("cannot create `{}`", parent.display()))?;
    }
    let conn = open_db(&db_path).with_context(|| format!("cannot open `{}`", db_path.display()))?;
    let config = StoreConfig::with_storage_key(&cli.key);
    let mut store = TaskListStore::open_with_config(SqliteKvStore::new(&conn), &config)?;
    if let LoadStatus::Recovered { error } = store.load_status() {
        eprintln!("warning: stored tasks were unreadable and were ignored ({error})");
    }

    let outcome = match cli.command {
        Command::List => {
            print_tasks(&store);
            return Ok(());
        }
        Command::Add { text, date } => store.add_task(&text, &date)?,
        Command::Done { index } => store.toggle_done(to_position(index)?)?,
        Command::Edit { index, text, date } => store.edit_task(to_position(index)?, &text, &date)?,
        Command::Delete { index, yes } => {
            store.delete_task(to_position(index)?, &mut TerminalPrompt { assume_yes: yes })?
        }
        Command::MarkAll => store.mark_all_done()?,
        Command::Clear { yes } => store.clear_all(&mut TerminalPrompt { assume_yes: yes })?,
        Command::Version => return Ok(()),
    };

    report(&outcome);
    print_tasks(&store);
    Ok(())
}

fn start_logging(cli: &Cli) {
    let Some(log_dir) = cli.log_dir.clone().or_else(|| data_path(LOG_DIR_NAME)) else {
        eprintln!("warning: logging disabled: no data directory; pass --log-dir");
        return;
    };
    let level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| default_log_level().as_str().to_string());
    if let Err(err) = init_logging(&level, &log_dir.to_string_lossy()) {
        eprintln!("warning: logging disabled: {err}");
    }
}

// Default location under the per-user data directory.
fn data_path(name: &str) -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join(DATA_DIR_NAME).join(name))
}

fn to_position(index: usize) -> Result<usize> {
    if index == 0 {
        bail!("task numbers start at 1");
    }
    Ok(index - 1)
}

fn report(outcome: &MutationOutcome) {
    if let Some(message) = outcome_message(outcome) {
        println!("{message}");
    }
}

fn outcome_message(outcome: &MutationOutcome) -> Option<String> {
    match outcome {
        MutationOutcome::Applied => None,
        MutationOutcome::Declined => Some("cancelled".to_string()),
        MutationOutcome::Rejected(RejectReason::IndexOutOfRange { index, len }) => {
            Some(format!("no task #{} (list has {len})", index + 1))
        }
        MutationOutcome::Rejected(RejectReason::Invalid(err)) => {
            Some(format!("nothing changed: {err}"))
        }
        MutationOutcome::Rejected(RejectReason::NotEditing) => Some("nothing changed".to_string()),
    }
}

fn print_tasks(store: &TaskListStore<SqliteKvStore<'_>>) {
    if store.is_empty() {
        println!("no tasks");
        return;
    }
    for (position, task) in store.tasks().iter().enumerate() {
        let mark = if task.done { "x" } else { " " };
        println!(
            "{:>3}. [{mark}] {} - {}",
            position + 1,
            task.text,
            task.date_string()
        );
    }
    println!(
        "{} pending, {} done",
        store.pending_count(),
        store.done_count()
    );
}
