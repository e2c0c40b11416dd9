// File: export.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

use anyhow::{anyhow, Context, Result};

use super::{print_info, print_success};
use crate::cli::ExportArgs;
use crate::report::{ReportFormat, ReportGenerator};
use crate::storage::CommuneStore;

pub async fn execute(args: &ExportArgs, store: &CommuneStore) -> Result<()> {
    let format: ReportFormat = args.format.parse().map_err(|e: String| anyhow!(e))?;

    let records = store
        .compiled_records()
        .context("Failed to read compiled records")?;
    print_info(&format!("Exporting {} compiled records", records.len()));

    let output = args.output.to_string_lossy().to_string();
    ReportGenerator::generate_report(&records, &output, format)
        .with_context(|| format!("Failed to write {}", output))?;

    print_success(&format!("Report saved to: {}", output));
    Ok(())
}
