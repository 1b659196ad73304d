use anyhow::Result;
use clap::{ArgAction, CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::io;
use std::path::PathBuf;
use taskboard::commands::{add, common, delete, list, menu, move_cmd};
use taskboard::completions::generate_completions;
use taskboard::models::{Priority, Stage};
use taskboard::validation::{clap_description_validator, clap_name_validator};

#[derive(Parser)]
#[command(name = "taskboard")]
#[command(about = "Three-stage personal task tracker", long_about = None)]
#[command(version)]
struct Cli {
    /// Directory holding the task files (default: current directory)
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive menu (default when no command is given)
    Menu,

    /// Show tasks sorted by priority
    List {
        /// Only show one stage (todo, in-progress, done)
        #[arg(short, long)]
        stage: Option<Stage>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Add a task at the front of its stage
    Add {
        /// Task name (no '#' or line breaks; max 128 characters)
        #[arg(value_parser = clap_name_validator)]
        name: String,

        /// Task description (no '#' or line breaks; max 500 characters)
        #[arg(value_parser = clap_description_validator)]
        description: String,

        /// Priority: high, medium, low (or 1, 2, 3)
        #[arg(short, long, default_value = "medium")]
        priority: Priority,

        /// Stage: todo, in-progress, done (or 0, 1, 2)
        #[arg(short, long, default_value = "todo")]
        stage: Stage,
    },

    /// Delete the first task with this name from a stage
    Delete {
        /// Stage to delete from (todo, in-progress, done)
        stage: Stage,

        /// Exact task name
        name: String,
    },

    /// Move the first task with this name to the front of another stage
    Move {
        /// Source stage (todo, in-progress, done)
        from: Stage,

        /// Destination stage (todo, in-progress, done)
        to: Stage,

        /// Exact task name
        name: String,
    },

    /// Generate shell completion script
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    taskboard::logging::init(cli.verbose);

    let command = cli.command.unwrap_or(Commands::Menu);

    if let Commands::Completions { shell } = &command {
        let mut cmd = Cli::command();
        generate_completions(&mut cmd, *shell, &mut io::stdout());
        return Ok(());
    }

    let store = common::open_store(cli.dir)?;

    match command {
        Commands::Menu => menu::execute(&store),
        Commands::List { stage, json } => list::execute(&store, stage, json),
        Commands::Add {
            name,
            description,
            priority,
            stage,
        } => add::execute(&store, name, description, priority, stage),
        Commands::Delete { stage, name } => delete::execute(&store, stage, name),
        Commands::Move { from, to, name } => move_cmd::execute(&store, from, to, name),
        Commands::Completions { .. } => Ok(()),
    }
}
