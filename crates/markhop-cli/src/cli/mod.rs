use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

mod args;
mod parsers;


pub use args::{CreateArgs, LogArgs, SearchArgs, WorkflowArgs};

#[derive(Debug, Parser)]
#[command(name = "markhop")]
#[command(about = "Chrome bookmarks and recent tabs for desktop launchers", version)]
pub struct Cli {
    #[command(flatten)]
    pub globals: GlobalArgs,

    /// Bare `markhop` lists every bookmark.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Overrides for paths otherwise taken from `MARKHOP_*` variables or the
/// default Chrome profile.
#[derive(Debug, Args)]
pub struct GlobalArgs {
    #[arg(long, global = true, value_name = "PATH")]
    pub bookmarks: Option<PathBuf>,
    #[arg(long, global = true, value_name = "PATH")]
    pub history: Option<PathBuf>,
    #[arg(long, global = true, value_name = "PATH")]
    pub log_dir: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Search bookmarks by title or url.
    #[command(visible_alias = "bm")]
    Search(SearchArgs),
    /// List pages visited in the recent history window.
    Tabs,
    /// Create a bookmark under a `/`-separated folder path.
    #[command(visible_alias = "bms")]
    Create(CreateArgs),
    /// Report whether the bookmark and history files exist.
    DebugPaths,
    /// Show the newest request log entries.
    Log(LogArgs),
    /// Package an Alfred workflow bundle.
    Workflow(WorkflowArgs),
    /// Any other first word starts a search query.
    #[command(external_subcommand)]
    Query(Vec<String>),
}
