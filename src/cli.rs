// File: cli.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2023-2025
// - Volker Schwaberow <volker@schwaberow.de>

use clap::{Args, Parser, Subcommand};
use log::LevelFilter;
use std::path::PathBuf;

use crate::config::{ConfigParameter, DEFAULT_LISTEN_ADDR, DEFAULT_PORTAL_URL};

#[derive(Parser, Debug)]
#[command(
    name = env!("CARGO_PKG_NAME"),
    version = env!("CARGO_PKG_VERSION"),
    author = env!("CARGO_PKG_AUTHORS"),
    about = env!("CARGO_PKG_DESCRIPTION"),
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[arg(long = "log-level", default_value = "warn", global = true)]
    pub log_level: String,

    #[arg(
        short = 'v',
        long = "verbose",
        help = "Enable verbose output",
        global = true
    )]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long = "quiet",
        help = "Reduce output verbosity",
        global = true
    )]
    pub quiet: bool,

    #[arg(long = "no-color", help = "Disable colored output", global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch raw result tables for every commune not cached yet
    Scrape(ScrapeArgs),
    /// Turn cached raw tables into compiled records
    Compile,
    /// Print compiled records
    List(ListArgs),
    /// Write compiled records to a file
    Export(ExportArgs),
    /// Show store statistics
    Stats(StatsArgs),
    /// Serve the HTTP API
    Serve(ServeArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ScrapeArgs {
    #[arg(long = "portal-url", default_value = DEFAULT_PORTAL_URL)]
    pub portal_url: String,

    #[arg(
        short = 'w',
        long = "max-sessions",
        default_value_t = 4,
        help = "Maximum number of browser sessions running at once (0: one per department)"
    )]
    pub max_sessions: usize,

    #[arg(long = "no-headless", help = "Show the browser window")]
    pub no_headless: bool,

    #[arg(
        short = 't',
        long = "timeout",
        default_value_t = 30,
        help = "Browser wait timeout in seconds"
    )]
    pub timeout: u64,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    #[arg(long = "format", default_value = "table")]
    pub format: String,

    #[arg(long = "commune", help = "Only show this commune")]
    pub commune: Option<String>,
}

#[derive(Args, Debug)]
pub struct ExportArgs {
    #[arg(short = 'o', long = "output")]
    pub output: PathBuf,

    #[arg(short = 'f', long = "format", default_value = "json")]
    pub format: String,
}

#[derive(Args, Debug)]
pub struct StatsArgs {
    #[arg(long = "format", default_value = "table")]
    pub format: String,
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    #[arg(short = 'l', long = "listen", default_value = DEFAULT_LISTEN_ADDR)]
    pub listen: String,

    #[command(flatten)]
    pub scrape: ScrapeArgs,
}

impl Cli {
    pub fn log_level_filter(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Error;
        }
        if self.verbose {
            return LevelFilter::Debug;
        }
        parse_level(&self.log_level)
    }
}

impl ScrapeArgs {
    pub fn to_config(&self) -> ConfigParameter {
        let mut config = ConfigParameter::new();
        config.set_portal_url(self.portal_url.clone());
        config.set_max_sessions(self.max_sessions);
        config.set_headless(!self.no_headless);
        config.set_timeout(self.timeout);
        config
    }
}

fn parse_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Warn,
    }
}
