// File: fetcher.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

use log::{info, warn};
use serde::Serialize;

use crate::browser::PortalSession;
use crate::errors::{FetchError, NavigationError};
use crate::models::RawCommuneRecord;
use crate::navigator::{list_communes, COMMUNE_FIELD};
use crate::storage::{CommuneStore, Namespace};

/// Position of the "general information" table on the result page.
pub const GENERAL_TABLE_INDEX: usize = 0;
/// Position of the measurements table. The page carries no marker to
/// identify it otherwise.
pub const RESULTS_TABLE_INDEX: usize = 2;

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct FetchSummary {
    pub department: String,
    pub fetched: usize,
    pub skipped: usize,
    pub failed: Vec<String>,
}

pub struct RawFetcher {
    store: CommuneStore,
}

impl RawFetcher {
    pub fn new(store: CommuneStore) -> Self {
        Self { store }
    }

    /// Fetches every commune of `department` missing from the raw store.
    ///
    /// Only navigation failures abort; a commune that fails is logged and
    /// left absent so the next run picks it up again.
    pub fn fetch_department(
        &self,
        session: &mut dyn PortalSession,
        department: &str,
    ) -> Result<FetchSummary, NavigationError> {
        let communes = list_communes(session, department)?;

        let mut summary = FetchSummary {
            department: department.to_string(),
            ..Default::default()
        };

        for commune in communes {
            match self.store.exists(Namespace::Raw, &commune) {
                Ok(true) => {
                    info!("Skipping {}", commune);
                    summary.skipped += 1;
                    continue;
                }
                Ok(false) => {}
                Err(e) => {
                    warn!("Failed to check raw store for {}: {}", commune, e);
                    summary.failed.push(commune);
                    continue;
                }
            }

            match self.fetch_commune(session, &commune) {
                Ok(_) => {
                    info!("Fetched {}", commune);
                    summary.fetched += 1;
                }
                Err(e) => {
                    warn!("Failed to fetch {} ({}): {}", commune, department, e);
                    summary.failed.push(commune);
                }
            }
        }

        Ok(summary)
    }

    pub fn fetch_commune(
        &self,
        session: &mut dyn PortalSession,
        commune: &str,
    ) -> Result<RawCommuneRecord, FetchError> {
        session.select_option(COMMUNE_FIELD, commune)?;
        session.submit()?;

        let tables = session.read_tables()?;
        let record = RawCommuneRecord {
            commune: commune.to_string(),
            general_informations: table_at(&tables, GENERAL_TABLE_INDEX)?,
            results: table_at(&tables, RESULTS_TABLE_INDEX)?,
        };

        self.store.put_raw(&record)?;
        Ok(record)
    }
}

fn table_at(tables: &[String], index: usize) -> Result<String, FetchError> {
    tables
        .get(index)
        .cloned()
        .ok_or(FetchError::MissingTable {
            index,
            found: tables.len(),
        })
}
