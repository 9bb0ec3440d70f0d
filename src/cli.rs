use clap::{Parser, Subcommand};
use posterforge::config::Overrides;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "posterforge")]
#[command(author, version, about = "Cache, decorate and restore movie posters")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub overrides: Overrides,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Process every tagged movie folder under the media root (default)
    Run,

    /// Copy cached original posters back over the final posters
    Restore,

    /// Resolve and validate configuration, then print a summary
    Validate,
}
