//! idsync command-line front end

mod cli;
mod commands;
mod state;

use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use idsync_core::Config;

use crate::cli::{Cli, Command};
use crate::commands::{CommandResult, RouteReport};
use crate::state::AppState;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    idsync_core::init_logging_at(cli.verbosity.tracing_level_filter());

    let result = run(&cli).await;
    let exit_code = if cli.json {
        print_json(result)
    } else {
        print_plain(&cli.command, result)
    };

    std::process::exit(exit_code);
}

async fn run(cli: &Cli) -> anyhow::Result<RouteReport> {
    let config = load_config(cli).context("failed to load configuration")?;
    let state = AppState::new(&config, cli.command.url())?;

    let report = match &cli.command {
        Command::Add(args) => commands::ids::add_ids(&state, &args.ids)?,
        Command::Delete(args) => commands::ids::delete_ids(&state, &args.ids)?,
        Command::Ids(args) => {
            let timeout = args.timeout_ms.map(Duration::from_millis);
            commands::ids::list_ids(&state, timeout).await?
        }
    };

    Ok(report)
}

/// Config file (or defaults) with command-line overrides applied
fn load_config(cli: &Cli) -> idsync_core::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    if let Some(key) = &cli.key {
        config.param_key = key.clone();
    }

    Ok(config)
}

fn print_json(result: anyhow::Result<RouteReport>) -> i32 {
    let (envelope, exit_code) = match result {
        Ok(report) => (CommandResult::ok(report), 0),
        Err(e) => (CommandResult::err(format!("{e:#}")), 1),
    };

    match serde_json::to_string_pretty(&envelope) {
        Ok(json) => {
            println!("{json}");
            exit_code
        }
        Err(e) => {
            eprintln!("error: failed to serialize result: {e}");
            1
        }
    }
}

fn print_plain(command: &Command, result: anyhow::Result<RouteReport>) -> i32 {
    match result {
        Ok(report) => {
            match command {
                Command::Ids(_) => {
                    for id in &report.ids {
                        println!("{id}");
                    }
                }
                Command::Add(_) | Command::Delete(_) => println!("{}", report.url),
            }
            0
        }
        Err(e) => {
            eprintln!("error: {e:#}");
            1
        }
    }
}
