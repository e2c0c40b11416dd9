// File: scrapestate.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2023-2025
// - Volker Schwaberow <volker@schwaberow.de>

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::fetcher::FetchSummary;

/// Counters for one scrape run across all departments.
#[derive(Debug, Clone, Serialize)]
pub struct ScrapeState {
    total_departments: usize,
    fetched: usize,
    skipped: usize,
    failed_communes: Vec<String>,
    failed_departments: Vec<String>,
    start_time: DateTime<Utc>,
    end_time: Option<DateTime<Utc>>,
}

impl ScrapeState {
    pub fn new() -> ScrapeState {
        ScrapeState {
            total_departments: 0,
            fetched: 0,
            skipped: 0,
            failed_communes: Vec::new(),
            failed_departments: Vec::new(),
            start_time: Utc::now(),
            end_time: None,
        }
    }

    pub fn set_total_departments(&mut self, total_departments: usize) {
        self.total_departments = total_departments;
    }

    pub fn total_departments(&self) -> usize {
        self.total_departments
    }

    pub fn add_summary(&mut self, summary: FetchSummary) {
        self.fetched += summary.fetched;
        self.skipped += summary.skipped;
        self.failed_communes.extend(summary.failed);
    }

    pub fn add_department_failure(&mut self, department: &str) {
        self.failed_departments.push(department.to_string());
    }

    pub fn fetched(&self) -> usize {
        self.fetched
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn failed_communes(&self) -> &[String] {
        &self.failed_communes
    }

    pub fn failed_departments(&self) -> &[String] {
        &self.failed_departments
    }

    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    pub fn finish(&mut self) {
        self.end_time = Some(Utc::now());
    }

    pub fn end_time(&self) -> Option<DateTime<Utc>> {
        self.end_time
    }

    pub fn duration_ms(&self) -> u64 {
        let end = self.end_time.unwrap_or_else(Utc::now);
        (end - self.start_time).num_milliseconds().max(0) as u64
    }
}

impl Default for ScrapeState {
    fn default() -> Self {
        Self::new()
    }
}
