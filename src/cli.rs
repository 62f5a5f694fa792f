use clap::{ArgAction, Args, Parser, Subcommand};
use memo::sanitize::DEFAULT_EXTENSION;

#[derive(Debug, Parser)]
#[command(name = "memo")]
#[command(about = "A CLI tool to create and manage markdown memos", version)]
#[command(disable_version_flag = true)]
pub struct Cli {
    /// Show version.
    #[arg(short = 'v', long, action = ArgAction::Version)]
    pub version: Option<bool>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create a new memo.
    New(NewArgs),
    /// List memos, newest first.
    List(ListArgs),
}

#[derive(Debug, Args)]
pub struct NewArgs {
    /// Memo name (default: HH-MM-SS)
    pub name: Option<String>,
    /// Memo file extension
    #[arg(short, long, default_value = DEFAULT_EXTENSION)]
    pub ext: String,
    /// Create a directory instead of a file
    #[arg(short, long)]
    pub directory: bool,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Only list memos with this extension
    #[arg(short, long)]
    pub ext: Option<String>,
    #[arg(long, default_value_t = 0)]
    pub limit: usize,
    #[arg(long)]
    pub json: bool,
}
