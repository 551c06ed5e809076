use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Config file (defaults to $ASHPATH_CONFIG, then the per-user config directory)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
    /// Print debug logging to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Print the per-user cache directory
    Dir {
        /// Also create the directory if it does not exist
        #[arg(long)]
        create: bool,
    },
    /// Print the full path of a file inside a directory
    Path {
        /// File name to append
        name: String,
        /// Directory to join with (defaults to the cache directory)
        #[arg(short, long)]
        dir: Option<PathBuf>,
    },
    /// Create a directory, succeeding if it already exists
    Mkdir {
        /// Directory to create
        path: PathBuf,
        /// Create missing parent directories too
        #[arg(short, long)]
        parents: bool,
    },
    /// Print the size in bytes of a file
    Size {
        /// File to measure
        file: PathBuf,
    },
}
