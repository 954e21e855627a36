//! Truncprime CLI: the `truncprime` command.

mod cli;
mod commands;
mod support;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    support::init_tracing(&cli.log);

    match cli.command {
        Commands::Check { numbers, json } => commands::check::run(cli.oracle, numbers, json),

        Commands::Search {
            variant,
            max_width,
            json,
        } => commands::search::run(cli.oracle, variant, max_width, json),

        Commands::Demo { max_width } => commands::demo::run(cli.oracle, max_width),
    }
}
