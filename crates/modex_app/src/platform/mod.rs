//! Terminal front end: wires the core state machine to the client engine.
mod app;
mod cli;
mod config;
mod effects;
mod headless;
mod logging;
mod repl;
mod ui;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use modex_logging::modex_info;

use cli::{Cli, Command};

pub fn run_app() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let loaded = config::load(cli.config.as_deref()).context("loading configuration")?;
    let mut config = loaded.config;
    config.apply_overrides(&cli);
    logging::initialize(&config);
    match &loaded.source {
        Some(path) => modex_info!("Loaded config from {:?}", path),
        None => modex_info!("No config file found, using defaults"),
    }

    match cli.command.unwrap_or(Command::Repl) {
        Command::Repl => {
            repl::run(&config)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Extract { urls, json, export } => {
            headless::run_extract(&config, &urls, json, export)
        }
        Command::Ping => headless::run_ping(&config),
    }
}
