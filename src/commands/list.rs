// File: list.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2023-2025
// - Volker Schwaberow <volker@schwaberow.de>

use anyhow::{Context, Result};
use colored::*;

use super::{print_error, print_success, print_warning};
use crate::cli::ListArgs;
use crate::models::CompiledCommuneRecord;
use crate::storage::CommuneStore;

pub async fn execute(args: &ListArgs, store: &CommuneStore) -> Result<()> {
    let records: Vec<CompiledCommuneRecord> = match args.commune {
        Some(ref commune) => store
            .compiled_record(commune)
            .context("Failed to read compiled record")?
            .into_iter()
            .collect(),
        None => store
            .compiled_records()
            .context("Failed to read compiled records")?,
    };

    if records.is_empty() {
        print_warning("No compiled records found");
        return Ok(());
    }

    match args.format.to_lowercase().as_str() {
        "table" => display_table(&records),
        "json" => println!("{}", serde_json::to_string_pretty(&records)?),
        _ => {
            print_error(&format!("Unsupported format: {}", args.format));
            return Ok(());
        }
    }

    print_success(&format!("{} compiled records", records.len()));
    Ok(())
}

fn display_table(records: &[CompiledCommuneRecord]) {
    for record in records {
        println!(
            "{} {}",
            record.commune.bold(),
            format!("[{}]", record.sampled_at).dimmed()
        );

        let width = record
            .results
            .iter()
            .map(|r| r.key.chars().count())
            .max()
            .unwrap_or(0);

        for result in &record.results {
            println!(
                "  {:<width$}  {:>12}  {}",
                result.key,
                result.value.cyan(),
                format!("max {}", result.maximum).dimmed(),
                width = width
            );
        }
    }
}
