use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{HttpRemoteStore, Settings, TodoController};
use shared::domain::OwnerId;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod commands;
mod dispatch;
mod render;

use commands::{parse_command, UiCommand, HELP};
use dispatch::Dispatcher;

#[derive(Parser, Debug)]
#[command(name = "todo", about = "Manage a remote todo list from the terminal")]
struct Args {
    /// Settings file; missing files are ignored.
    #[arg(long, default_value = client_core::config::DEFAULT_CONFIG_FILE)]
    config: PathBuf,
    /// Base URL of the item API.
    #[arg(long)]
    api_url: Option<String>,
    #[arg(long)]
    owner_id: Option<i64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = Settings::load(&args.config)
        .with_context(|| format!("failed to load settings from {}", args.config.display()))?;
    if let Some(api_url) = args.api_url {
        settings.api_url = api_url;
    }
    if let Some(owner_id) = args.owner_id {
        settings.owner_id = OwnerId(owner_id);
    }

    let store = HttpRemoteStore::new(&settings.api_url)
        .with_context(|| format!("invalid api url '{}'", settings.api_url))?;
    let controller = TodoController::new(Arc::new(store), &settings);
    controller.load().await;
    print!("{}", render::render(&controller.view().await));

    let dispatcher = Dispatcher::new(controller.clone());
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(message) => {
                eprintln!("{message}");
                continue;
            }
        };
        debug!(?command, "dispatching command");

        if command.is_mutation() {
            match dispatcher.submit(command).await {
                Ok(task) => {
                    let controller = dispatcher.controller().clone();
                    tokio::spawn(async move {
                        if task.await.is_ok() {
                            print!("{}", render::render(&controller.view().await));
                        }
                    });
                }
                Err(busy) => eprintln!("{busy}"),
            }
            continue;
        }

        match command {
            UiCommand::StartEdit(id) => controller.start_editing(id).await,
            UiCommand::CancelEdit => controller.cancel_editing().await,
            UiCommand::Filter(mode) => controller.select_filter(mode).await,
            UiCommand::Dismiss => controller.dismiss_error().await,
            UiCommand::Help => {
                println!("{HELP}");
                continue;
            }
            UiCommand::Quit => break,
            _ => {}
        }
        print!("{}", render::render(&controller.view().await));
    }

    Ok(())
}
