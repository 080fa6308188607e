use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use service::{JsonFileStorage, RosterStore, ServiceError};
use tracing::{error, info, warn};
use uuid::Uuid;

#[derive(Debug, Parser)]
#[clap(name = "roster", version, about = "Manage a file-backed student roster")]
struct CommandLine {
    /// Roster file; overrides config and ROSTER_DATA_FILE
    #[clap(long, global = true)]
    data_file: Option<PathBuf>,
    /// TOML config file; defaults to CONFIG_PATH or config.toml
    #[clap(long, global = true)]
    config: Option<PathBuf>,
    /// Continue with an empty roster when the roster file cannot be loaded
    #[clap(long = "allow-empty", global = true, action)]
    allow_empty: bool,
    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Add a new student
    Add {
        #[clap(long)]
        name: String,
        #[clap(long)]
        roll: String,
        #[clap(long)]
        grade: String,
    },
    /// Change name and grade of an existing student
    Edit {
        #[clap(long)]
        roll: String,
        #[clap(long)]
        name: String,
        #[clap(long)]
        grade: String,
    },
    /// Show one student by roll number
    Find {
        #[clap(long)]
        roll: String,
    },
    /// Remove a student by roll number
    Remove {
        #[clap(long)]
        roll: String,
    },
    /// List every student in insertion order
    List,
}

fn open_store(data_file: PathBuf, allow_empty: bool) -> anyhow::Result<RosterStore> {
    let mut store = RosterStore::new(JsonFileStorage::new(data_file));
    let path = store.storage().path().to_path_buf();
    common::env::ensure_env(&path)?;
    match store.load() {
        Ok(records) => info!(event = "opened", path = %path.display(), records, "roster opened"),
        Err(e) if allow_empty => {
            warn!(event = "load_ignored", path = %path.display(), error = %e, "continuing with an empty roster");
            eprintln!("warning: {e}; continuing with an empty roster");
        }
        Err(e) => return Err(anyhow::anyhow!("{e} (pass --allow-empty to start with an empty roster)")),
    }
    Ok(store)
}

fn run(store: &mut RosterStore, command: Command) -> Result<(), ServiceError> {
    match command {
        Command::Add { name, roll, grade } => {
            let rec = store.add(&name, &roll, &grade)?;
            println!("Student added: {rec}");
        }
        Command::Edit { roll, name, grade } => {
            let rec = store.edit(&roll, &name, &grade)?;
            println!("Student details updated: {rec}");
        }
        Command::Find { roll } => match store.find(&roll) {
            Ok(rec) => println!("Student Found:\n{rec}"),
            Err(e @ ServiceError::NotFound(_)) => {
                println!("No student found with Roll No: {}", roll.trim());
                return Err(e);
            }
            Err(e) => return Err(e),
        },
        Command::Remove { roll } => {
            let rec = store.remove(&roll)?;
            println!("Student removed: {rec}");
        }
        Command::List => {
            println!("All Students:");
            if store.is_empty() {
                println!("No students found.");
            }
            for rec in store.list_all() {
                println!("{rec}");
            }
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    dotenv().ok();
    let args = CommandLine::parse();

    let cfg = match configs::AppConfig::load_and_validate(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };
    common::utils::logging::init_logging(cfg.logging.is_json());

    let run_id = Uuid::new_v4();
    std::panic::set_hook(Box::new(move |info| {
        error!(event = "panic", %run_id, message = %info, "unhandled panic occurred");
    }));

    let data_file = args.data_file.unwrap_or(cfg.storage.data_file);
    info!(event = "start", %run_id, version = env!("CARGO_PKG_VERSION"), data_file = %data_file.display(), "roster starting");

    let mut store = match open_store(data_file, args.allow_empty) {
        Ok(store) => store,
        Err(e) => {
            error!(event = "open_failed", %run_id, error = %e, "roster could not be opened");
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    match run(&mut store, args.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
