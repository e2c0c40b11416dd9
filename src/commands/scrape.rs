// File: scrape.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

use anyhow::{Context, Result};
use std::sync::Arc;

use super::{format_duration, print_info, print_success, print_warning};
use crate::browser::ChromeSessionFactory;
use crate::cli::ScrapeArgs;
use crate::pipeline::ScrapePipeline;
use crate::scrapestate::ScrapeState;
use crate::storage::CommuneStore;

pub async fn execute(args: &ScrapeArgs, store: &CommuneStore) -> Result<()> {
    let mut config = args.to_config();
    config.set_show_progress(true);

    print_info(&format!("Scraping {}", config.portal_url()));

    let factory = ChromeSessionFactory::new(config.headless(), config.timeout_duration());
    let pipeline = ScrapePipeline::new(config, store.clone(), Arc::new(factory));
    let state = pipeline
        .run()
        .await
        .context("Failed to list departments on the portal")?;

    report(&state);
    Ok(())
}

fn report(state: &ScrapeState) {
    print_success(&format!(
        "{} departments in {}: {} fetched, {} already cached",
        state.total_departments(),
        format_duration(state.duration_ms()),
        state.fetched(),
        state.skipped()
    ));

    if !state.failed_communes().is_empty() {
        print_warning(&format!(
            "{} communes failed and will be retried on the next run: {}",
            state.failed_communes().len(),
            state.failed_communes().join(", ")
        ));
    }

    if !state.failed_departments().is_empty() {
        print_warning(&format!(
            "Departments aborted: {}",
            state.failed_departments().join(", ")
        ));
    }
}
