// File: stats.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2023-2025
// - Volker Schwaberow <volker@schwaberow.de>

use anyhow::{Context, Result};
use colored::*;

use super::{format_file_size, print_error, print_info};
use crate::cli::StatsArgs;
use crate::storage::{CommuneStore, Namespace, StoreStats};

pub async fn execute(args: &StatsArgs, store: &CommuneStore) -> Result<()> {
    print_info("Generating store statistics...");

    let stats = store.stats().context("Failed to read store statistics")?;

    match args.format.to_lowercase().as_str() {
        "table" => display_stats_table(&stats),
        "json" => println!("{}", serde_json::to_string_pretty(&stats)?),
        _ => print_error(&format!("Unsupported format: {}", args.format)),
    }

    Ok(())
}

fn display_stats_table(stats: &StoreStats) {
    println!("{}", "Store".bold().underline());
    println!(
        "  {:<22} {}",
        Namespace::Raw.tree_name(),
        stats.raw_count.to_string().cyan()
    );
    println!(
        "  {:<22} {}",
        Namespace::Compiled.tree_name(),
        stats.compiled_count.to_string().cyan()
    );
    println!(
        "  {:<22} {}",
        "pending compile",
        if stats.pending_compile > 0 {
            stats.pending_compile.to_string().yellow()
        } else {
            stats.pending_compile.to_string().green()
        }
    );
    println!(
        "  {:<22} {}",
        "size on disk",
        format_file_size(stats.size_bytes)
    );
}
