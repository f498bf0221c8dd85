use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "zv", about = concat!("[>] zelvo v", env!("CARGO_PKG_VERSION"), " - your tasks from the terminal"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Backend base URL (overrides the configured one)
    #[arg(long, global = true)]
    pub base_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in and store the bearer token
    Login(LoginArgs),
    /// Create an account and store the bearer token
    Register(RegisterArgs),
    /// List all tasks
    Tasks(TasksArgs),
    /// Show the kanban board
    Board,
    /// Show the sprint/backlog explorer
    Explorer,
    /// Show the month calendar
    Calendar(CalendarArgs),
    /// Show dashboard summaries (recent, stats, weekly activity)
    Dashboard,
    /// List categories
    Categories,
    /// Create a task
    Add(AddArgs),
    /// Edit fields of an existing task
    Edit(EditArgs),
    /// Mark a task done (shortcut for edit --status done)
    Done(IdArg),
    /// Delete a task
    Rm(IdArg),
    /// Show one task in full
    Show(IdArg),
}

// ---------------------------------------------------------------------------
// Auth args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct LoginArgs {
    pub email: String,
    pub password: String,
}

#[derive(Args)]
pub struct RegisterArgs {
    pub name: String,
    pub email: String,
    pub password: String,
}

// ---------------------------------------------------------------------------
// Read command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct TasksArgs {
    /// Filter by status (todo, in-progress, review, done)
    #[arg(long)]
    pub status: Option<String>,
}

#[derive(Args)]
pub struct CalendarArgs {
    /// Month to show as YYYY-MM (default: current month)
    #[arg(long)]
    pub month: Option<String>,
}

#[derive(Args)]
pub struct IdArg {
    pub id: i64,
}

// ---------------------------------------------------------------------------
// Write command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct AddArgs {
    pub title: String,
    /// Due date as YYYY-MM-DD (required)
    #[arg(long)]
    pub due: String,
    /// Priority (low, medium, high)
    #[arg(long)]
    pub priority: Option<String>,
    /// Initial status (todo, in-progress, review, done)
    #[arg(long)]
    pub status: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    /// Category id
    #[arg(long)]
    pub category: Option<i64>,
}

#[derive(Args)]
pub struct EditArgs {
    pub id: i64,
    #[arg(long)]
    pub title: Option<String>,
    /// Due date as YYYY-MM-DD
    #[arg(long)]
    pub due: Option<String>,
    /// Priority (low, medium, high)
    #[arg(long)]
    pub priority: Option<String>,
    /// Status (todo, in-progress, review, done)
    #[arg(long)]
    pub status: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    /// Category id; 0 clears the category
    #[arg(long)]
    pub category: Option<i64>,
}
