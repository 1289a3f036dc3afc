use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "sprig", about = "Sprig: a minimal content-addressed version control system", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Log debug events to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Run as if started in <DIR>
    #[arg(short = 'C', global = true, value_name = "DIR")]
    pub dir: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create an empty repository in the current directory
    Init,
    /// Store a file and stage it for the next commit
    Add(AddArgs),
    /// Record the staged files as a new commit
    Commit(CommitArgs),
    /// Show commit history, newest first
    Log(LogArgs),
    /// Show what a commit changed relative to its parent
    Show(ShowArgs),
    /// List the files staged for the next commit
    Status,
}

#[derive(Args)]
pub struct AddArgs {
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,
}

#[derive(Args)]
pub struct CommitArgs {
    pub message: String,
}

#[derive(Args)]
pub struct LogArgs {
    /// Show at most N commits
    #[arg(short = 'n', long, value_name = "N")]
    pub limit: Option<usize>,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Full digest, unique prefix (4+ hex digits), or HEAD
    pub commit: String,
}
