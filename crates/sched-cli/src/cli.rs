use clap::{Parser, Subcommand};

/// Personal task scheduler with repeating due dates
#[derive(Parser, Debug)]
#[command(name = "sched", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Compute the next date of a repeat rule
    Next(NextCommand),
    /// Add a new task
    Add(AddCommand),
    /// List tasks ordered by due date
    List(ListCommand),
    /// Show a single task
    Show(ShowCommand),
    /// Edit a task
    Edit(EditCommand),
    /// Mark a task as done (removes it, or moves it to its next date)
    Done(DoneCommand),
    /// Delete a task
    Delete(DeleteCommand),
}

#[derive(Parser, Debug, Clone)]
pub struct NextCommand {
    /// Due date to advance from (YYYYMMDD)
    #[clap(short, long)]
    pub date: String,
    /// Repeat rule, e.g. "d 7", "y", "w 1,5", "m 1,-1 6"
    #[clap(short, long, default_value = "", allow_hyphen_values = true)]
    pub repeat: String,
    /// Reference day (YYYYMMDD), defaults to today
    #[clap(short, long)]
    pub now: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct AddCommand {
    /// The title of the task
    pub title: String,
    /// Due date: YYYYMMDD or a phrase like "tomorrow"; defaults to today
    #[clap(short, long)]
    pub date: Option<String>,
    /// A free-form comment
    #[clap(short, long)]
    pub comment: Option<String>,
    /// Repeat rule
    #[clap(short, long, allow_hyphen_values = true)]
    pub repeat: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct ListCommand {
    /// Maximum number of tasks to show
    #[clap(short, long)]
    pub limit: Option<u32>,
    /// Filter by text in title or comment, or by date (DD.MM.YYYY or YYYYMMDD)
    #[clap(short, long)]
    pub search: Option<String>,
    /// Print JSON instead of a table
    #[clap(long)]
    pub json: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct ShowCommand {
    /// The ID (or unique prefix) of the task
    pub id: String,
    /// Print JSON instead of text
    #[clap(long)]
    pub json: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct EditCommand {
    /// The ID (or unique prefix) of the task to edit
    pub id: String,
    /// The new title
    #[clap(short, long)]
    pub title: Option<String>,
    /// The new due date
    #[clap(short, long, conflicts_with = "date_clear")]
    pub date: Option<String>,
    /// Reset the due date to today
    #[clap(long)]
    pub date_clear: bool,
    /// The new comment
    #[clap(short, long, conflicts_with = "comment_clear")]
    pub comment: Option<String>,
    /// Remove the comment
    #[clap(long)]
    pub comment_clear: bool,
    /// The new repeat rule
    #[clap(short, long, conflicts_with = "repeat_clear", allow_hyphen_values = true)]
    pub repeat: Option<String>,
    /// Make the task one-off
    #[clap(long)]
    pub repeat_clear: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct DoneCommand {
    /// The ID (or unique prefix) of the task
    pub id: String,
}

#[derive(Parser, Debug, Clone)]
pub struct DeleteCommand {
    /// The ID (or unique prefix) of the task to delete
    pub id: String,
    /// Skip the confirmation prompt
    #[clap(short, long)]
    pub force: bool,
}
