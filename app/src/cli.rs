use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "file_nodes_host")]
#[command(about = "Runs file I/O nodes (image savers, loaders, text tools) from the command line", long_about = None)]
pub struct Cli {
    /// Output root for relative save paths (overrides host.toml)
    #[arg(long, global = true)]
    pub output_dir: Option<PathBuf>,

    /// Host config file (defaults to the platform config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List every registered node type
    List,

    /// Show the pins of one node type
    Describe {
        /// Node type id, e.g. SequentialImageLoader
        type_id: String,
    },

    /// Execute a node and print its outputs as JSON
    Run {
        /// Node type id
        type_id: String,

        /// Input as name=value; image inputs take comma-separated file paths
        #[arg(short = 'i', long = "input", value_name = "NAME=VALUE")]
        inputs: Vec<String>,

        /// Execute the node this many times against the same manager
        #[arg(long, default_value_t = 1)]
        repeat: u32,
    },

    /// Host config file commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Write a host.toml with default values
    Init {
        /// Replace an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the effective configuration
    Show,
}
