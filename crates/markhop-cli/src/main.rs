mod cli;
mod commands;
mod launcher;

use anyhow::Result;
use clap::Parser;

use crate::cli::Cli;

fn main() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => return commands::report_parse_error(err),
    };
    commands::run(cli.globals, cli.command)
}
