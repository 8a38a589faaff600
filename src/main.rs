use clap::{Parser, Subcommand};
use std::path::PathBuf;
use todo_cli::manager::TodoManager;
use todo_cli::task::{DueDateUpdate, Priority, Task};

#[derive(Parser, Debug)]
#[command(name = "todo-cli", about = "Personal task list, persisted to a JSON file")]
struct Cli {
    /// Path of the todo file.
    #[arg(long, global = true, env = "TODO_FILE", default_value = "todos.json")]
    file: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Subcommand)]
enum Commands {
    /// Add a new task.
    Add {
        description: String,
        /// low, medium, or high; anything else falls back to medium.
        #[arg(short, long, default_value = "medium")]
        priority: String,
        /// Free-form due date, e.g. 2024-01-31.
        #[arg(long)]
        due: Option<String>,
    },
    /// List tasks.
    List {
        /// Hide completed tasks.
        #[arg(long)]
        pending: bool,
        /// Only show tasks with this priority.
        #[arg(long)]
        priority: Option<String>,
    },
    /// Mark a task as completed.
    Done { id: u32 },
    /// Mark a task as pending again.
    Undone { id: u32 },
    /// Remove a task.
    Remove { id: u32 },
    /// Change fields of an existing task; omitted fields are kept.
    Update {
        id: u32,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(short, long)]
        priority: Option<String>,
        #[arg(long, conflicts_with = "clear_due")]
        due: Option<String>,
        /// Remove the due date.
        #[arg(long)]
        clear_due: bool,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Cli::parse();
    let mut manager = TodoManager::open(&args.file);

    match args.command {
        Commands::Add {
            description,
            priority,
            due,
        } => {
            if description.trim().is_empty() {
                anyhow::bail!("task description cannot be empty");
            }
            let id = manager.add(description, &priority, due)?;
            println!("Todo added with ID: {id}");
        }
        Commands::List { pending, priority } => {
            let filter = priority.map(|text| parse_priority(&text)).transpose()?;
            display_todos(&manager.list(!pending, filter));
        }
        Commands::Done { id } => report(manager.complete(id)?, id, "marked as completed"),
        Commands::Undone { id } => report(manager.uncomplete(id)?, id, "marked as pending"),
        Commands::Remove { id } => report(manager.remove(id)?, id, "removed"),
        Commands::Update {
            id,
            description,
            priority,
            due,
            clear_due,
        } => {
            let due = if clear_due {
                DueDateUpdate::Clear
            } else {
                due.map_or(DueDateUpdate::Keep, DueDateUpdate::Set)
            };
            report(
                manager.update(id, description, priority.as_deref(), due)?,
                id,
                "updated",
            )
        }
    }

    Ok(())
}

fn parse_priority(text: &str) -> anyhow::Result<Priority> {
    Priority::parse(text)
        .ok_or_else(|| anyhow::anyhow!("invalid priority {text:?}, use low, medium, or high"))
}

fn report(found: bool, id: u32, action: &str) {
    if found {
        println!("Todo {id} {action}.");
    } else {
        println!("Todo {id} not found.");
        std::process::exit(1);
    }
}

fn display_todos(todos: &[Task]) {
    if todos.is_empty() {
        println!("No todos found.");
        return;
    }

    println!("{:=<80}", "");
    println!(
        "{:<4} {:<10} {:<10} {:<33} {:<15}",
        "ID", "Status", "Priority", "Task", "Due Date"
    );
    println!("{:=<80}", "");
    for todo in todos {
        let status = if todo.completed { "✓ Done" } else { "○ Pending" };
        let priority = format!("[{}]", todo.priority.to_string().to_uppercase());
        let due = todo.due_date.as_deref().unwrap_or("No due date");
        println!(
            "{:<4} {:<10} {:<10} {:<33} {:<15}",
            todo.id,
            status,
            priority,
            truncate(&todo.description, 30),
            due
        );
    }
    println!("{:=<80}", "");
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let prefix: String = text.chars().take(max).collect();
        format!("{prefix}...")
    } else {
        text.to_string()
    }
}
