// File: compiler.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

use log::{debug, info, warn};
use scraper::{ElementRef, Html, Selector};
use serde::Serialize;

use crate::errors::{ParseError, StoreResult};
use crate::models::{CompiledCommuneRecord, MeasurementResult, RawCommuneRecord};
use crate::storage::{CommuneStore, Namespace};

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct CompileSummary {
    pub compiled: usize,
    pub skipped: usize,
    pub failed: Vec<String>,
}

pub struct RecordCompiler {
    store: CommuneStore,
}

impl RecordCompiler {
    pub fn new(store: CommuneStore) -> Self {
        Self { store }
    }

    /// Compiles every raw record that has no compiled counterpart yet.
    pub fn compile_all(&self) -> StoreResult<CompileSummary> {
        let mut summary = CompileSummary::default();

        for (commune, raw) in self.store.get_all(Namespace::Raw)? {
            if self.store.exists(Namespace::Compiled, &commune)? {
                debug!("skip {}", commune);
                summary.skipped += 1;
                continue;
            }

            match compile_record(&commune, &raw) {
                Ok(record) => {
                    self.store.put_compiled(&record)?;
                    debug!("compiled {} ({} results)", commune, record.results.len());
                    summary.compiled += 1;
                }
                Err(e) => {
                    warn!("{}", e);
                    summary.failed.push(commune);
                }
            }
        }

        info!(
            "Compile finished: {} compiled, {} skipped, {} failed",
            summary.compiled,
            summary.skipped,
            summary.failed.len()
        );
        Ok(summary)
    }
}

/// Builds a compiled record from the JSON stored under `commune` in the raw
/// namespace. Table content never fails; only an undecodable record does.
pub fn compile_record(commune: &str, raw_json: &str) -> Result<CompiledCommuneRecord, ParseError> {
    let cleaned = strip_escape_artifacts(raw_json);
    let raw: RawCommuneRecord =
        serde_json::from_str(&cleaned).map_err(|source| ParseError::InvalidRecord {
            commune: commune.to_string(),
            source,
        })?;

    Ok(CompiledCommuneRecord {
        commune: commune.to_string(),
        sampled_at: parse_sampled_at(&raw.general_informations),
        results: parse_results(&raw.results),
    })
}

/// Drops the escaped `\t` / `\n` sequences the portal leaves in its cells.
pub fn strip_escape_artifacts(raw_json: &str) -> String {
    raw_json.replace(r"\\t", "").replace(r"\\n", "")
}

fn table_document(fragment: &str) -> Html {
    Html::parse_document(&format!(
        "<html><head></head><body><table>{}</table></body></html>",
        fragment
    ))
}

/// Text of the cells in the table's leading row.
pub fn parse_sampled_at(general_fragment: &str) -> String {
    let document = table_document(general_fragment);
    let selector = Selector::parse("tr:nth-child(1) td").unwrap();

    document
        .select(&selector)
        .flat_map(|cell| cell.text())
        .collect()
}

/// One result per body row: parameter, measured value, legal maximum.
pub fn parse_results(results_fragment: &str) -> Vec<MeasurementResult> {
    let document = table_document(results_fragment);
    let rows = Selector::parse("tbody tr").unwrap();

    document
        .select(&rows)
        .map(|row| MeasurementResult {
            key: cell_text(row, 0),
            value: cell_text(row, 1),
            maximum: cell_text(row, 2),
        })
        .collect()
}

// Position counts every element child, like `:nth-child`; a non-`td` cell
// at that position reads as empty.
fn cell_text(row: ElementRef<'_>, position: usize) -> String {
    row.children()
        .filter_map(ElementRef::wrap)
        .nth(position)
        .filter(|cell| cell.value().name() == "td")
        .map(|cell| cell.text().collect())
        .unwrap_or_default()
}
