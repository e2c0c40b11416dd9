// File: report.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

use std::fs::File;
use std::io::{Result, Write};
use std::str::FromStr;

use crate::models::CompiledCommuneRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Json,
    Csv,
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            "csv" => Ok(ReportFormat::Csv),
            other => Err(format!("Unsupported report format: {}", other)),
        }
    }
}

pub struct ReportGenerator;

impl ReportGenerator {
    pub fn generate_report(
        records: &[CompiledCommuneRecord],
        output_path: &str,
        format: ReportFormat,
    ) -> Result<()> {
        let mut file = File::create(output_path)?;
        let content = Self::render(records, format)?;
        file.write_all(content.as_bytes())?;
        Ok(())
    }

    pub fn render(records: &[CompiledCommuneRecord], format: ReportFormat) -> Result<String> {
        match format {
            ReportFormat::Text => Ok(Self::render_text(records)),
            ReportFormat::Json => Self::render_json(records),
            ReportFormat::Csv => Ok(Self::render_csv(records)),
        }
    }

    pub fn render_text(records: &[CompiledCommuneRecord]) -> String {
        let mut out = String::new();
        for record in records {
            out.push_str(&format!("{} [{}]\n", record.commune, record.sampled_at));
            for result in &record.results {
                out.push_str(&format!(
                    "  {}: {} (max {})\n",
                    result.key, result.value, result.maximum
                ));
            }
        }
        out
    }

    pub fn render_json(records: &[CompiledCommuneRecord]) -> Result<String> {
        let mut json = serde_json::to_string_pretty(records)?;
        json.push('\n');
        Ok(json)
    }

    /// One line per measurement, communes without results get a single
    /// line with empty measurement columns.
    pub fn render_csv(records: &[CompiledCommuneRecord]) -> String {
        let mut csv = String::from("Commune,Sampled_At,Parameter,Value,Maximum\n");

        for record in records {
            if record.results.is_empty() {
                csv.push_str(&format!(
                    "{},{},,,\n",
                    escape_csv(&record.commune),
                    escape_csv(&record.sampled_at)
                ));
                continue;
            }

            for result in &record.results {
                csv.push_str(&format!(
                    "{},{},{},{},{}\n",
                    escape_csv(&record.commune),
                    escape_csv(&record.sampled_at),
                    escape_csv(&result.key),
                    escape_csv(&result.value),
                    escape_csv(&result.maximum)
                ));
            }
        }

        csv
    }
}

fn escape_csv(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
