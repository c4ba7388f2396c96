use anyhow::{Context, Result};
use clap::error::ErrorKind;
use markhop_core::workflow::{WorkflowPackageOptions, package_workflow};
use markhop_core::{AppConfig, FolderResolver, LeafCollision, Markhop};

use crate::cli::{Commands, CreateArgs, GlobalArgs, SearchArgs, WorkflowArgs};
use crate::launcher::ScriptFilterOutput;

mod support;

use self::support::{print_json, print_lines};

pub(crate) fn run(globals: GlobalArgs, command: Option<Commands>) -> Result<()> {
    let command = command.unwrap_or_else(|| Commands::Query(Vec::new()));
    let config = apply_global_overrides(AppConfig::from_env(), globals);
    match execute(config, command) {
        Ok(output) => output.emit(),
        Err(err) => {
            // The launcher only renders stdout, so the failure goes there too.
            print_json(&ScriptFilterOutput::error(&format!("{err:#}")))?;
            Err(err)
        }
    }
}

/// Help and version go to the terminal as usual; any other parse failure is
/// answered with a launcher item and a non-zero exit.
pub(crate) fn report_parse_error(err: clap::Error) -> Result<()> {
    match err.kind() {
        ErrorKind::DisplayHelp
        | ErrorKind::DisplayVersion
        | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => err.exit(),
        _ => {
            print_json(&ScriptFilterOutput::error(&parse_error_message(&err)))?;
            Err(err.into())
        }
    }
}

/// The rendered clap error up to its usage block, on one line.
fn parse_error_message(err: &clap::Error) -> String {
    let rendered = err.to_string();
    let message = rendered
        .lines()
        .take_while(|line| !line.starts_with("Usage:"))
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    message
        .strip_prefix("error: ")
        .unwrap_or(&message)
        .to_string()
}

#[derive(Debug, PartialEq)]
enum CommandOutput {
    Launcher(ScriptFilterOutput),
    Lines(Vec<String>),
    Json(serde_json::Value),
}

impl CommandOutput {
    fn emit(&self) -> Result<()> {
        match self {
            Self::Launcher(output) => print_json(output),
            Self::Lines(lines) => print_lines(lines),
            Self::Json(value) => print_json(value),
        }
    }
}

fn apply_global_overrides(mut config: AppConfig, globals: GlobalArgs) -> AppConfig {
    if let Some(path) = globals.bookmarks {
        config.bookmarks_path = path;
    }
    if let Some(path) = globals.history {
        config.history_path = path;
    }
    if let Some(dir) = globals.log_dir {
        config.log_dir = Some(dir);
    }
    config
}

fn execute(config: AppConfig, command: Commands) -> Result<CommandOutput> {
    let app = Markhop::new(config);
    let output = match command {
        Commands::Search(args) => CommandOutput::Launcher(run_search(&app, &args)),
        Commands::Tabs => CommandOutput::Launcher(ScriptFilterOutput::tabs(&app.open_tabs())),
        Commands::Create(args) => CommandOutput::Launcher(run_create(&app, &args)),
        Commands::DebugPaths => CommandOutput::Lines(app.debug_paths()),
        Commands::Log(args) => {
            let entries = app
                .recent_requests(args.limit)
                .context("failed to read request log")?;
            CommandOutput::Json(serde_json::to_value(entries)?)
        }
        Commands::Workflow(args) => run_workflow(&args)?,
        Commands::Query(words) => {
            let args = SearchArgs {
                query: words,
                limit: None,
            };
            CommandOutput::Launcher(run_search(&app, &args))
        }
    };
    Ok(output)
}

fn run_search(app: &Markhop, args: &SearchArgs) -> ScriptFilterOutput {
    let mut options = app.config().search.clone();
    if let Some(limit) = args.limit {
        options.empty_query_limit = Some(limit);
    }
    let query = args.joined_query();
    let hits = app.search_bookmarks_with(query.as_deref(), &options);
    ScriptFilterOutput::bookmarks(&hits)
}

fn run_create(app: &Markhop, args: &CreateArgs) -> ScriptFilterOutput {
    let policy = if args.allow_leaf_collision {
        LeafCollision::CreateSibling
    } else {
        LeafCollision::Reject
    };
    let resolver = FolderResolver::new()
        .with_root(args.root.clone())
        .with_leaf_collision(policy);

    if app.create_bookmark(&args.url, &args.folder_path, &args.title, &resolver) {
        ScriptFilterOutput::created(&args.url, &args.folder_path, &args.title)
    } else {
        ScriptFilterOutput::create_failed(&args.folder_path, &args.title)
    }
}

fn run_workflow(args: &WorkflowArgs) -> Result<CommandOutput> {
    let mut options = WorkflowPackageOptions::new(args.out.clone());
    options.binary = args.binary.clone();
    options.keyword = args.keyword.clone();
    let path = package_workflow(&options).context("failed to package workflow")?;
    Ok(CommandOutput::Json(serde_json::json!({
        "status": "ok",
        "path": path,
    })))
}
