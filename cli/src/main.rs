//! `todo`: command-line access to the same data file the server uses.
//!
//! ```bash
//! todo add Buy groceries
//! todo list
//! todo done 1
//! todo rm 2
//! ```

mod render;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use todo_core::{TodoResult, TodoService};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "todo")]
#[command(about = "Simple command-line todo manager", long_about = None)]
#[command(version)]
struct Cli {
    /// JSON file holding the todos
    #[arg(long, env = "TODO_DATA_FILE", default_value = todo_core::DEFAULT_DATA_FILE)]
    data_file: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Add a new todo
    Add {
        /// Todo text; multiple words are joined with spaces
        #[arg(value_name = "TEXT", num_args = 1.., required = true)]
        text: Vec<String>,
    },
    /// List all todos
    List,
    /// Mark a todo as completed
    Done {
        #[arg(value_name = "ID")]
        id: String,
    },
    /// Remove a todo
    Rm {
        #[arg(value_name = "ID")]
        id: String,
    },
}

fn main() -> ExitCode {
    init_tracing("warn");
    let cli = Cli::parse();

    match run(cli) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> TodoResult<String> {
    tracing::debug!(data_file = %cli.data_file.display(), command = ?cli.command, "running command");
    let service = TodoService::open(cli.data_file)?;
    execute(&service, cli.command)
}

fn execute(service: &TodoService, command: Command) -> TodoResult<String> {
    match command {
        Command::Add { text } => service.create(&text.join(" ")).map(|t| render::added(&t)),
        Command::List => service.list_all().map(|todos| render::list(&todos)),
        Command::Done { id } => mark_done(service, &id),
        Command::Rm { id } => service.delete(&id).map(|t| render::removed(&t)),
    }
}

/// Complete a todo without toggling an already-completed one back.
fn mark_done(service: &TodoService, raw_id: &str) -> TodoResult<String> {
    let (todo, changed) = service.mark_done(raw_id)?;
    Ok(if changed {
        render::completed(&todo)
    } else {
        render::already_completed(&todo)
    })
}

fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

#[cfg(test)]
mod tests {
    use todo_core::TodoError;

    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("todo").chain(args.iter().copied())).unwrap()
    }

    fn service(dir: &tempfile::TempDir) -> TodoService {
        TodoService::open(dir.path().join("todos.json")).unwrap()
    }

    #[test]
    fn add_joins_words() {
        let dir = tempfile::tempdir().unwrap();
        let svc = service(&dir);
        let cli = parse(&["add", "Buy", "groceries"]);

        let out = execute(&svc, cli.command).unwrap();

        assert_eq!(out, "Added todo #1: \"Buy groceries\"");
    }

    #[test]
    fn add_requires_text() {
        assert!(Cli::try_parse_from(["todo", "add"]).is_err());
    }

    #[test]
    fn data_file_flag_is_honored() {
        let cli = parse(&["--data-file", "/tmp/elsewhere.json", "list"]);
        assert_eq!(cli.data_file, PathBuf::from("/tmp/elsewhere.json"));
    }

    #[test]
    fn done_does_not_toggle_back() {
        let dir = tempfile::tempdir().unwrap();
        let svc = service(&dir);
        svc.create("Walk dog").unwrap();

        let first = execute(&svc, parse(&["done", "1"]).command).unwrap();
        let second = execute(&svc, parse(&["done", "1"]).command).unwrap();

        assert_eq!(first, "Marked todo #1 as completed: \"Walk dog\"");
        assert_eq!(second, "Todo #1 is already completed");
        assert!(svc.list_all().unwrap()[0].completed);
    }

    #[test]
    fn done_with_bad_id_is_invalid_input() {
        let dir = tempfile::tempdir().unwrap();
        let err = execute(&service(&dir), parse(&["done", "one"]).command).unwrap_err();
        assert!(matches!(err, TodoError::InvalidInput(_)));
    }

    #[test]
    fn rm_reports_removed_text_and_missing_ids() {
        let dir = tempfile::tempdir().unwrap();
        let svc = service(&dir);
        svc.create("Pay bills").unwrap();

        let out = execute(&svc, parse(&["rm", "1"]).command).unwrap();
        assert_eq!(out, "Removed todo #1: \"Pay bills\"");

        let err = execute(&svc, parse(&["rm", "1"]).command).unwrap_err();
        assert!(matches!(err, TodoError::NotFound(1)));
    }

    #[test]
    fn state_persists_between_invocations() {
        let dir = tempfile::tempdir().unwrap();
        execute(&service(&dir), parse(&["add", "first"]).command).unwrap();
        execute(&service(&dir), parse(&["add", "second"]).command).unwrap();
        execute(&service(&dir), parse(&["rm", "2"]).command).unwrap();

        let out = execute(&service(&dir), parse(&["add", "third"]).command).unwrap();
        assert_eq!(out, "Added todo #3: \"third\"");
    }
}
