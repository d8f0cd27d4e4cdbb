use crate::config::StorageMode;
use clap::{Parser, Subcommand};

/// Command-line interface definition for rWorklog
/// Conversational CLI to record work activities and write daily reports
#[derive(Parser)]
#[command(
    name = "rworklog",
    version = env!("CARGO_PKG_VERSION"),
    about = "Record work activities and assemble daily reports through a guided conversation",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Override the author name stored on new records
    #[arg(global = true, long = "user")]
    pub user: Option<String>,

    /// Override the storage backend
    #[arg(global = true, long = "storage", value_enum)]
    pub storage: Option<StorageMode>,

    /// Run in test mode (no config file update, no typing delay)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        /// Print the current configuration file to stdout
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        /// Edit the configuration file with your preferred editor
        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/vim/notepad)"
        )]
        edit_config: bool,

        /// Specify the editor to use (overrides $EDITOR/$VISUAL).
        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Record a work activity through a guided conversation
    Record,

    /// Assemble today's daily report through a guided conversation
    Report,

    /// List recorded work activities or daily reports
    List {
        /// Show records of every day instead of today only
        #[arg(long = "all", conflicts_with = "date")]
        all: bool,

        /// Show records of a specific date (YYYY-MM-DD)
        #[arg(long = "date", value_name = "YYYY-MM-DD")]
        date: Option<String>,

        /// List daily reports instead of work records
        #[arg(long = "reports")]
        reports: bool,
    },

    /// Show totals over the recorded activities
    Stats,

    /// Export work records as CSV
    Export {
        /// Output directory (default: export_dir from the configuration)
        #[arg(long, value_name = "DIR")]
        dir: Option<String>,

        /// Overwrite output file without confirmation
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Check the connection to the remote record store
    Ping,
}
