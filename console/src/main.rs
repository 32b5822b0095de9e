//! msconsole - Entry Point
//!
//! Operator console for authoring, deploying and testing microservices
//! managed by a remote orchestration backend.

use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};

use msconsole::app::run::{connect, init_settings, load_options};
use msconsole::cli::args::{Cli, Command, ConfigCommand};
use msconsole::cli::{commands, repl};
use msconsole::logs::init_logging;
use msconsole::utils::version_info;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<bool> {
    match &cli.command {
        Command::Version => {
            println!("{}", serde_json::to_string_pretty(&version_info())?);
            return Ok(true);
        }
        Command::Config {
            command: ConfigCommand::Init,
        } => {
            let path = init_settings(cli.config.clone()).await?;
            println!("wrote {}", path.display());
            return Ok(true);
        }
        _ => {}
    }

    let mut options = load_options(cli.config.clone(), cli.backend_url.clone()).await?;
    if let Some(level) = cli.log_level {
        options.log.log_level = level;
    }

    // Keep the guard alive so file logs are flushed on exit
    let _log_guard = match init_logging(options.log.clone()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            None
        }
    };

    if let Command::Config {
        command: ConfigCommand::Show,
    } = &cli.command
    {
        println!("{:#?}", options);
        return Ok(true);
    }

    info!("Running msconsole with options: {:?}", options);
    let mut console = connect(&options)?;

    match cli.command {
        Command::Shell => {
            repl::run(&mut console, tokio::io::stdin()).await?;
            Ok(true)
        }
        command => commands::execute(&mut console, command).await,
    }
}
