//! Command-line interface definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// tcarchive - keep a local copy of a Transparent Classroom account
#[derive(Parser, Debug)]
#[command(name = "tcarchive")]
#[command(version)]
#[command(about = "Archive Transparent Classroom posts, photos and announcements", long_about = None)]
pub struct Cli {
    /// Configuration file (default: ./config.toml if present)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<String>,

    /// Archive root, overriding `archive.root`
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Log at debug level
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Archive posts, then download photos for every archived child
    Archive {
        /// Reuse posts already on disk instead of listing them again
        #[arg(long)]
        no_update_posts: bool,
    },

    /// List and save posts for every child, without photos
    Posts,

    /// Download photos for posts already on disk (no login needed)
    Photos,

    /// Save school and classroom announcements
    Announcements {
        /// Only check the shape of the saved announcements.json
        #[arg(long)]
        validate_only: bool,
    },

    /// Check how archived post listings are ordered
    ///
    /// Reports which orderings (id, created_at, date, date ++ created_at, ...)
    /// each listing is consistent with.
    Audit {
        /// posts.json files to check (default: every archived child)
        files: Vec<PathBuf>,

        /// Output machine-readable JSON
        #[arg(long)]
        json: bool,
    },

    /// Log in and show the account and its children
    Whoami,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print or write a sample configuration file
    Generate {
        /// Output path (default: stdout)
        #[arg(long = "output", short = 'o')]
        output_path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
