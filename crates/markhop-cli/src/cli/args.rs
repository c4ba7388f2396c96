use std::path::PathBuf;

use clap::Args;
use markhop_core::resolver::DEFAULT_TARGET_ROOT;
use markhop_core::workflow::DEFAULT_KEYWORD;

use super::parsers::parse_min_one_usize;

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Search term, optionally followed by a url suffix (`gh /issues`).
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub query: Vec<String>,
    /// Maximum results for an empty query.
    #[arg(long, value_parser = parse_min_one_usize)]
    pub limit: Option<usize>,
}

impl SearchArgs {
    /// Words are rejoined with single spaces; no words means no query.
    pub fn joined_query(&self) -> Option<String> {
        if self.query.is_empty() {
            None
        } else {
            Some(self.query.join(" "))
        }
    }
}

#[derive(Debug, Args)]
pub struct CreateArgs {
    pub url: String,
    /// Folder path below the root, e.g. `Work/Docs`.
    pub folder_path: String,
    pub title: String,
    #[arg(long, default_value = DEFAULT_TARGET_ROOT)]
    pub root: String,
    /// Create a folder next to a bookmark of the same name instead of failing.
    #[arg(long, default_value_t = false)]
    pub allow_leaf_collision: bool,
}

#[derive(Debug, Args)]
pub struct WorkflowArgs {
    #[arg(long, value_name = "DIR")]
    pub out: PathBuf,
    /// Binary to bundle; without it the workflow calls `markhop` from `PATH`.
    #[arg(long, value_name = "PATH")]
    pub binary: Option<PathBuf>,
    #[arg(long, default_value = DEFAULT_KEYWORD)]
    pub keyword: String,
}

#[derive(Debug, Args)]
pub struct LogArgs {
    #[arg(long, default_value_t = 20, value_parser = parse_min_one_usize)]
    pub limit: usize,
}
