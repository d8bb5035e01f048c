use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "assetcopy", version)]
#[command(
    about = "Copy or symlink a project file into an Asset Library directory",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Project file to operate on
    #[arg(short, long, global = true)]
    pub file: Option<PathBuf>,

    /// JSON inventory describing the project's assets, images and linked libraries
    #[arg(long, global = true)]
    pub inventory: Option<PathBuf>,

    /// Directory holding config.json (defaults to the user config directory)
    #[arg(long, global = true)]
    pub config_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Copy or symlink the project into a library (name or directory)
    #[command(alias = "cp")]
    Copy {
        /// Library name from the config, or a directory path
        library: String,

        /// Go ahead despite preflight warnings
        #[arg(short, long)]
        yes: bool,
    },

    /// Run the preflight checks only
    Preflight,

    /// Merge the project's catalogs into a library without copying the file
    Catalog {
        /// Library name from the config, or a directory path
        library: String,
    },

    /// List configured libraries
    #[command(alias = "ls")]
    Libraries,

    /// Add or remove a library
    Library {
        #[command(subcommand)]
        action: LibraryAction,
    },

    /// Get or set configuration
    Config {
        /// Configuration key (e.g., create_symlinks)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum LibraryAction {
    /// Register a library directory under a name
    Add { name: String, path: PathBuf },

    /// Forget a library
    #[command(alias = "rm")]
    Remove { name: String },
}
