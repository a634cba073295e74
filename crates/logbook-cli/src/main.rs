//! Logbook CLI - a plain-text, optionally encrypted, command-line journal
//!
//! This is the command-line interface for Logbook. It resolves the
//! configuration and the intended mode, then hands off to the core
//! library.

mod app;
mod cli;
mod commands;
mod config;
mod constants;
mod errors;
mod helpers;
mod logging;
mod output;
mod security;

use clap::{CommandFactory, Parser};
use clap_complete::generate;

use crate::app::AppContext;
use crate::cli::Cli;
use crate::errors::{exit_code_for, CliError};

fn main() {
    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        let mut command = Cli::command();
        generate(shell, &mut command, "logbook", &mut std::io::stdout());
        return;
    }

    logging::init(cli.debug);

    if let Err(e) = run(&cli) {
        if let Some(cli_err) = e.downcast_ref::<CliError>() {
            cli_err.exit()
        }
        eprintln!("Error: {}", e);
        std::process::exit(exit_code_for(&e));
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let (config_path, config) = AppContext::load_config()?;

    if cli.list {
        commands::list::handle_list(&config, &config_path);
        return Ok(());
    }

    let mut ctx = AppContext::new(cli, config_path, config)?;
    commands::dispatch(&mut ctx)
}
