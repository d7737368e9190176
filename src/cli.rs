use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "otask")]
#[command(about = "A terminal task list backed by a remote task store", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a task without opening the TUI
    Add {
        title: String,

        /// Optional description
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Print the current task list
    List,
}
