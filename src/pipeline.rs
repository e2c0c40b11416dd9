// File: pipeline.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info};
use std::sync::Arc;

use crate::browser::{PortalSession, SessionFactory};
use crate::config::ConfigParameter;
use crate::errors::{BrowserError, NavigationError};
use crate::fetcher::{FetchSummary, RawFetcher};
use crate::models::Department;
use crate::navigator::list_departments;
use crate::scrapestate::ScrapeState;
use crate::storage::CommuneStore;

/// Drives a full scrape: one session to discover departments, then one
/// session per department, at most `max_sessions` at a time (all at once
/// when `max_sessions` is 0).
#[derive(Clone)]
pub struct ScrapePipeline {
    config: ConfigParameter,
    store: CommuneStore,
    factory: Arc<dyn SessionFactory>,
}

impl ScrapePipeline {
    pub fn new(
        config: ConfigParameter,
        store: CommuneStore,
        factory: Arc<dyn SessionFactory>,
    ) -> Self {
        Self {
            config,
            store,
            factory,
        }
    }

    pub async fn run(&self) -> Result<ScrapeState, NavigationError> {
        let mut state = ScrapeState::new();
        let url = self.config.portal_url().to_string();

        let factory = Arc::clone(&self.factory);
        let discover_url = url.clone();
        let departments =
            tokio::task::spawn_blocking(move || discover_departments(factory.as_ref(), &discover_url))
                .await
                .map_err(|e| BrowserError::interaction("discover departments", e))??;

        let limit = self.config.session_limit(departments.len());
        info!(
            "Scraping {} departments with up to {} sessions",
            departments.len(),
            limit
        );
        state.set_total_departments(departments.len());

        let pb = self.progress_bar(departments.len() as u64);

        let tasks = departments.into_iter().map(|department| {
            let factory = Arc::clone(&self.factory);
            let store = self.store.clone();
            let url = url.clone();
            async move {
                let task_department = department.clone();
                let joined = tokio::task::spawn_blocking(move || {
                    scrape_department(factory.as_ref(), store, &url, &task_department)
                })
                .await;
                (department, joined)
            }
        });

        let mut results = stream::iter(tasks).buffer_unordered(limit);

        while let Some((department, joined)) = results.next().await {
            match joined {
                Ok(Ok(summary)) => {
                    info!(
                        "Department {}: {} fetched, {} skipped, {} failed",
                        department,
                        summary.fetched,
                        summary.skipped,
                        summary.failed.len()
                    );
                    state.add_summary(summary);
                }
                Ok(Err(e)) => {
                    error!("Department {} aborted: {}", department, e);
                    state.add_department_failure(&department);
                }
                Err(e) => {
                    error!("Department {} task panicked: {}", department, e);
                    state.add_department_failure(&department);
                }
            }
            pb.inc(1);
        }

        pb.finish_and_clear();
        if let Err(e) = self.store.flush() {
            error!("Failed to flush store after scrape: {}", e);
        }
        state.finish();
        Ok(state)
    }

    fn progress_bar(&self, len: u64) -> ProgressBar {
        if !self.config.show_progress() {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(len);
        if let Ok(style) = ProgressStyle::with_template(
            "[{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} departments",
        ) {
            pb.set_style(style.progress_chars("█▉▊▋▌▍▎▏  "));
        }
        pb
    }
}

fn discover_departments(
    factory: &dyn SessionFactory,
    url: &str,
) -> Result<Vec<Department>, NavigationError> {
    let mut session = factory.open()?;
    session.navigate(url)?;
    let departments = list_departments(session.as_mut());
    close_session(session.as_mut());
    departments
}

fn scrape_department(
    factory: &dyn SessionFactory,
    store: CommuneStore,
    url: &str,
    department: &str,
) -> Result<FetchSummary, NavigationError> {
    let mut session = factory.open()?;
    session.navigate(url)?;

    let summary = RawFetcher::new(store).fetch_department(session.as_mut(), department);
    close_session(session.as_mut());
    summary
}

fn close_session(session: &mut dyn PortalSession) {
    if let Err(e) = session.close() {
        debug!("Failed to close session: {}", e);
    }
}
