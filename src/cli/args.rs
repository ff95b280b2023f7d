use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "kindle", version, author, about = "Keep your daily streak burning")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Record today's (or another day's) activity counts
    Log {
        /// Tasks and routines scheduled for the day
        #[arg(long)]
        total: u32,
        /// How many of them were completed
        #[arg(long)]
        completed: u32,
        /// Completed items counting toward the minimum-tasks rule (defaults to --completed)
        #[arg(long)]
        qualifying: Option<u32>,
        /// Focus sessions finished
        #[arg(long)]
        focus: Option<u32>,
        /// Day to record, YYYY-MM-DD (defaults to today)
        #[arg(long)]
        date: Option<String>,
    },
    /// Show flame level, progress and today's checklist
    Status {
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// List all flame levels
    Levels,
    /// Evaluate a day snapshot read as JSON from stdin
    Check {
        /// Current streak in days
        #[arg(long)]
        streak: u32,
    },
    /// Show statistics
    Stats {
        /// Show a strip for the last 7 days
        #[arg(long)]
        week: bool,
    },
    /// Configuration helpers
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

impl Commands {
    /// Whether the command needs a loaded and validated config file.
    ///
    /// `config path` must keep working when the file itself is broken.
    pub fn needs_config(&self) -> bool {
        !matches!(
            self,
            Commands::Config {
                action: ConfigCommands::Path
            }
        )
    }
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the config file location
    Path,
    /// Print the effective configuration
    Show,
    /// Write the effective configuration to the config file
    Init,
}
