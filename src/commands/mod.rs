// File: mod.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2023-2025
// - Volker Schwaberow <volker@schwaberow.de>

use anyhow::Result;
use colored::*;

use crate::cli::{ExportArgs, ListArgs, ScrapeArgs, StatsArgs};
use crate::storage::CommuneStore;

pub mod compile;
pub mod export;
pub mod list;
pub mod scrape;
pub mod stats;

pub async fn handle_scrape_command(args: &ScrapeArgs, store: &CommuneStore) -> Result<()> {
    scrape::execute(args, store).await
}

pub async fn handle_compile_command(store: &CommuneStore) -> Result<()> {
    compile::execute(store).await
}

pub async fn handle_list_command(args: &ListArgs, store: &CommuneStore) -> Result<()> {
    list::execute(args, store).await
}

pub async fn handle_export_command(args: &ExportArgs, store: &CommuneStore) -> Result<()> {
    export::execute(args, store).await
}

pub async fn handle_stats_command(args: &StatsArgs, store: &CommuneStore) -> Result<()> {
    stats::execute(args, store).await
}

fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message);
}

fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message);
}

fn print_warning(message: &str) {
    println!("{} {}", "⚠".yellow().bold(), message);
}

fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}

fn format_duration(ms: u64) -> String {
    if ms >= 60000 {
        format!("{}m {:.1}s", ms / 60000, (ms % 60000) as f64 / 1000.0)
    } else if ms >= 1000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        format!("{}ms", ms)
    }
}

fn format_file_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[unit_index])
    } else {
        format!("{:.2} {}", size, UNITS[unit_index])
    }
}
