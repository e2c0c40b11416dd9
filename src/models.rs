// File: models.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

use serde::{Deserialize, Serialize};

/// Option value of the portal's department selector.
pub type Department = String;

/// Option value of the portal's commune selector. Primary key of both stores.
pub type Commune = String;

/// Result tables captured verbatim from the portal for one commune.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCommuneRecord {
    pub commune: Commune,
    #[serde(rename = "generalInformations", alias = "generalInformationsHtml")]
    pub general_informations: String,
    #[serde(alias = "resultsHtml")]
    pub results: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeasurementResult {
    pub key: String,
    pub value: String,
    pub maximum: String,
}

impl MeasurementResult {
    pub fn new(key: &str, value: &str, maximum: &str) -> Self {
        Self {
            key: key.to_string(),
            value: value.to_string(),
            maximum: maximum.to_string(),
        }
    }
}

/// Parsed sampling date and measurements of one commune.
///
/// Written and served as `sampledAt`; caches holding the older
/// `dateDePrelevement` key still load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompiledCommuneRecord {
    pub commune: Commune,
    #[serde(rename = "sampledAt", alias = "dateDePrelevement")]
    pub sampled_at: String,
    pub results: Vec<MeasurementResult>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_record_uses_portal_cache_keys() {
        let record = RawCommuneRecord {
            commune: "075056".to_string(),
            general_informations: "<tr><td>x</td></tr>".to_string(),
            results: "<tbody></tbody>".to_string(),
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["commune"], "075056");
        assert_eq!(json["generalInformations"], "<tr><td>x</td></tr>");
        assert_eq!(json["results"], "<tbody></tbody>");
    }

    #[test]
    fn test_raw_record_accepts_html_suffixed_aliases() {
        let json = r#"{"commune":"a","generalInformationsHtml":"g","resultsHtml":"r"}"#;
        let record: RawCommuneRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.general_informations, "g");
        assert_eq!(record.results, "r");
    }

    #[test]
    fn test_compiled_record_serialization() {
        let record = CompiledCommuneRecord {
            commune: "a".to_string(),
            sampled_at: "12/05/2023".to_string(),
            results: vec![MeasurementResult::new("pH", "7.1", "8.5")],
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["sampledAt"], "12/05/2023");
        assert!(json.get("dateDePrelevement").is_none());
        assert_eq!(json["results"][0]["key"], "pH");
        assert_eq!(json["results"][0]["maximum"], "8.5");

        let alias: CompiledCommuneRecord = serde_json::from_str(
            r#"{"commune":"a","dateDePrelevement":"12/05/2023","results":[]}"#,
        )
        .unwrap();
        assert_eq!(alias.sampled_at, "12/05/2023");
    }
}
