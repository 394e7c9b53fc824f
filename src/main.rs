use clap::{Args, Parser, Subcommand};
use eyre::{Result, eyre};
use std::path::PathBuf;
use std::process;
use taskplanner::{Config, DEFAULT_STATUS, Submitted, TaskForm, TaskInput, TaskStore, date, render};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "taskplanner")]
#[command(about = "TaskPlanner CLI - Manage a task list that persists between runs")]
#[command(version = env!("GIT_DESCRIBE"))]
struct Cli {
    /// Path to a YAML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory holding the task list (overrides config)
    #[arg(short, long)]
    store_path: Option<PathBuf>,

    /// Keep tasks in memory only for this run
    #[arg(long)]
    no_persist: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new task
    Add(AddArgs),

    /// Edit an existing task; omitted fields keep their current values
    Edit(EditArgs),

    /// Delete a task
    Delete {
        id: u64,
    },

    /// Mark a task as done
    Done {
        id: u64,
    },

    /// Show all tasks
    List,
}

#[derive(Args)]
struct AddArgs {
    #[arg(long)]
    name: String,

    #[arg(long)]
    description: String,

    #[arg(long)]
    assigned_to: String,

    #[arg(long, default_value = "")]
    due_date: String,

    #[arg(long, default_value = DEFAULT_STATUS)]
    status: String,
}

#[derive(Args)]
struct EditArgs {
    id: u64,

    #[arg(long)]
    name: Option<String>,

    #[arg(long)]
    description: Option<String>,

    #[arg(long)]
    assigned_to: Option<String>,

    #[arg(long)]
    due_date: Option<String>,

    #[arg(long)]
    status: Option<String>,
}

fn main() -> Result<()> {
    // Setup tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(path) = cli.store_path {
        config.store_path = path;
    }
    if cli.no_persist {
        config.persist = false;
    }
    config.validate()?;

    let mut store = config.open_store()?;
    let mut form = TaskForm::new();

    match cli.command {
        Commands::Add(args) => {
            let input = TaskInput {
                name: args.name,
                description: args.description,
                assigned_to: args.assigned_to,
                due_date: args.due_date,
                status: args.status,
            };
            exit_on_failure(submit(&mut form, &mut store, &input)?);
        }
        Commands::Edit(args) => {
            let mut input = form
                .begin_edit(&store, args.id)
                .ok_or_else(|| eyre!("No task with id {}", args.id))?;
            if let Some(name) = args.name {
                input.name = name;
            }
            if let Some(description) = args.description {
                input.description = description;
            }
            if let Some(assigned_to) = args.assigned_to {
                input.assigned_to = assigned_to;
            }
            if let Some(due_date) = args.due_date {
                input.due_date = due_date;
            }
            if let Some(status) = args.status {
                input.status = status;
            }
            exit_on_failure(submit(&mut form, &mut store, &input)?);
        }
        Commands::Delete { id } => store.delete_task(id)?,
        Commands::Done { id } => store.mark_task_as_done(id)?,
        Commands::List => {}
    }

    println!("{}", date::today_header());
    print!("{}", render::render_table(store.tasks()));

    Ok(())
}

/// Submit the form, returning the process exit code
///
/// Validation failures are reported and leave the store untouched.
fn submit(form: &mut TaskForm, store: &mut TaskStore, input: &TaskInput) -> Result<i32> {
    let code = match form.submit(store, input)? {
        Ok(Submitted::Created(task)) => {
            println!("Added task {}", task.id);
            0
        }
        Ok(Submitted::Updated(id)) => {
            println!("Updated task {}", id);
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    };
    Ok(code)
}

fn exit_on_failure(code: i32) {
    if code != 0 {
        process::exit(code);
    }
}
