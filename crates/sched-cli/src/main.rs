use anyhow::Result;
use clap::Parser;
use owo_colors::{OwoColorize, Style};
use sched_core::db;
use sched_core::error::CoreError;
use sched_core::repository::SqliteRepository;

mod cli;
mod commands;
mod config;
mod logging;
mod parser;
mod util;
mod views;

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();

    let config = config::Config::new().unwrap_or_else(|e| {
        eprintln!("{} ignoring invalid configuration: {}", "Warning:".yellow().bold(), e);
        config::Config::default()
    });
    logging::init(&config.log_level);

    if let Err(e) = run(cli, &config).await {
        handle_error(e);
        std::process::exit(1);
    }
}

async fn run(cli: cli::Cli, config: &config::Config) -> Result<()> {
    match cli.command {
        // the rule calculator needs no database
        cli::Commands::Next(command) => commands::next::next_date(command),
        cli::Commands::Add(command) => {
            commands::add::add_task(&open_store(config).await?, command).await
        }
        cli::Commands::List(command) => {
            commands::list::list_tasks(&open_store(config).await?, command, config).await
        }
        cli::Commands::Show(command) => {
            commands::show::show_task(&open_store(config).await?, command).await
        }
        cli::Commands::Edit(command) => {
            commands::edit::edit_task(&open_store(config).await?, command).await
        }
        cli::Commands::Done(command) => {
            commands::done::done_task(&open_store(config).await?, command).await
        }
        cli::Commands::Delete(command) => {
            commands::delete::delete_task(&open_store(config).await?, command).await
        }
    }
}

async fn open_store(config: &config::Config) -> Result<SqliteRepository> {
    tracing::debug!(database = %config.database_path, "opening task store");
    let db_pool = db::establish_connection(&config.database_path).await?;
    Ok(SqliteRepository::new(db_pool))
}

fn handle_error(err: anyhow::Error) {
    let error_style = Style::new().red().bold();

    if let Some(core_error) = err.downcast_ref::<CoreError>() {
        match core_error {
            CoreError::NotFound(s) => {
                eprintln!("{} {}", "Error:".style(error_style), s);
            }
            CoreError::AmbiguousId(tasks) => {
                eprintln!("{}", "Error: Ambiguous ID.".style(error_style));
                eprintln!("Did you mean one of these?");
                for (id, title) in tasks {
                    eprintln!("  {} ({})", id.yellow(), title);
                }
            }
            CoreError::InvalidInput(s) => {
                eprintln!("{} Invalid input: {}", "Error:".style(error_style), s);
            }
            _ => eprintln!("{} {:#}", "Error:".style(error_style), err),
        }
    } else {
        eprintln!("{} {:#}", "Error:".style(error_style), err);
    }
}
