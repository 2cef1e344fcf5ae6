use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use daily::config::Backend;
use std::path::PathBuf;

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format: "0.3.2" for releases, "0.3.2@abc1234 2024-01-15 14:30" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "daily", bin_name = "daily", version = get_version())]
#[command(about = "A journal with one entry per day", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Storage backend (overrides configuration)
    #[arg(long, global = true, value_enum)]
    pub backend: Option<Backend>,

    /// Data directory (overrides configuration)
    #[arg(long, global = true, value_name = "PATH")]
    pub data_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write the entry for a day
    #[command(alias = "n")]
    New {
        /// Date of the entry, defaults to today
        #[arg(short, long, value_name = "YYYY-MM-DD")]
        date: Option<NaiveDate>,

        /// Entry text
        #[arg(required = true, num_args = 1..)]
        content: Vec<String>,
    },

    /// List entries, newest first
    #[command(alias = "ls")]
    List {
        /// Entries per page, defaults to the configured page size
        #[arg(short, long)]
        limit: Option<usize>,

        /// Continue from the cursor printed by a previous page
        #[arg(short, long)]
        cursor: Option<String>,

        /// Earliest date to include
        #[arg(long, value_name = "YYYY-MM-DD")]
        from: Option<NaiveDate>,

        /// Latest date to include
        #[arg(long, value_name = "YYYY-MM-DD")]
        to: Option<NaiveDate>,

        /// Follow cursors and print every matching entry
        #[arg(short, long)]
        all: bool,
    },

    /// Show the entry for a day, defaults to today
    #[command(alias = "v")]
    Show {
        #[arg(value_name = "YYYY-MM-DD")]
        date: Option<NaiveDate>,
    },

    /// Replace the text of an existing entry
    #[command(alias = "e")]
    Edit {
        #[arg(value_name = "YYYY-MM-DD")]
        date: NaiveDate,

        /// New entry text
        #[arg(required = true, num_args = 1..)]
        content: Vec<String>,
    },

    /// Delete the entry for a day
    #[command(alias = "rm")]
    Delete {
        #[arg(value_name = "YYYY-MM-DD")]
        date: NaiveDate,
    },

    /// Copy every entry into the other backend
    Migrate {
        /// Backend to copy into, defaults to the one not in use
        #[arg(long, value_enum)]
        to: Option<Backend>,
    },

    /// Show the effective configuration
    Config,
}
