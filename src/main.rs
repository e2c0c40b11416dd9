// File: main.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2023-2025
// - Volker Schwaberow <volker@schwaberow.de>

use anyhow::{Context, Result};
use clap::Parser;
use simple_logger::SimpleLogger;
use std::sync::Arc;

use eaux::browser::ChromeSessionFactory;
use eaux::cli::{Cli, Commands, ServeArgs};
use eaux::commands;
use eaux::pipeline::ScrapePipeline;
use eaux::server::{self, AppState};
use eaux::storage::CommuneStore;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    SimpleLogger::new()
        .with_level(cli.log_level_filter())
        .init()
        .context("Failed to initialise logger")?;

    if cli.no_color {
        colored::control::set_override(false);
    }

    let store = CommuneStore::new(cli.data_dir.clone())?;

    match cli.command {
        Commands::Scrape(ref args) => commands::handle_scrape_command(args, &store).await,
        Commands::Compile => commands::handle_compile_command(&store).await,
        Commands::List(ref args) => commands::handle_list_command(args, &store).await,
        Commands::Export(ref args) => commands::handle_export_command(args, &store).await,
        Commands::Stats(ref args) => commands::handle_stats_command(args, &store).await,
        Commands::Serve(ref args) => run_server(args, store).await,
    }
}

async fn run_server(args: &ServeArgs, store: CommuneStore) -> Result<()> {
    let mut config = args.scrape.to_config();
    config.set_listen_addr(args.listen.clone());

    let factory = ChromeSessionFactory::new(config.headless(), config.timeout_duration());
    let listen_addr = config.listen_addr().to_string();
    let pipeline = ScrapePipeline::new(config, store.clone(), Arc::new(factory));

    server::serve(&listen_addr, AppState::new(store.clone(), pipeline)).await?;
    store.flush().context("Failed to flush store")?;
    Ok(())
}
