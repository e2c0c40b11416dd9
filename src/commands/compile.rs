// File: compile.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

use anyhow::{Context, Result};

use super::{print_info, print_success, print_warning};
use crate::compiler::RecordCompiler;
use crate::storage::CommuneStore;

pub async fn execute(store: &CommuneStore) -> Result<()> {
    print_info("Compiling raw records...");

    let compiler = RecordCompiler::new(store.clone());
    let summary = tokio::task::spawn_blocking(move || compiler.compile_all())
        .await
        .context("Compile task panicked")?
        .context("Failed to compile records")?;
    store.flush().context("Failed to flush store")?;

    print_success(&format!(
        "{} compiled, {} already compiled",
        summary.compiled, summary.skipped
    ));
    if !summary.failed.is_empty() {
        print_warning(&format!(
            "{} raw records could not be decoded: {}",
            summary.failed.len(),
            summary.failed.join(", ")
        ));
    }

    Ok(())
}
