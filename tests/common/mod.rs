// File: common/mod.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use eaux::browser::{PortalSession, SessionFactory};
use eaux::config::ConfigParameter;
use eaux::errors::BrowserError;
use eaux::navigator::{COMMUNE_FIELD, DEPARTMENT_FIELD};
use eaux::pipeline::ScrapePipeline;
use eaux::storage::CommuneStore;

pub const PORTAL_URL: &str = "http://portal.test/orobnat/afficherPage.do?methode=menu";

pub fn general_html(date: &str) -> String {
    format!(
        "\n\t<tbody><tr><td>{}</td></tr><tr><td>Conclusion</td><td>Eau conforme</td></tr></tbody>",
        date
    )
}

pub fn results_html(rows: &[(&str, &str, &str)]) -> String {
    let mut html = String::from("<thead><tr><th>Paramètre</th><th>Valeur</th><th>Limite</th></tr></thead><tbody>");
    for (key, value, maximum) in rows {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
            key, value, maximum
        ));
    }
    html.push_str("</tbody>");
    html
}

#[derive(Default)]
struct Portal {
    departments: Vec<(String, Vec<String>)>,
    pages: HashMap<String, Vec<String>>,
    submits: Vec<String>,
}

/// In-memory portal shared by every session a [`ScriptedFactory`] opens.
#[derive(Clone, Default)]
pub struct ScriptedFactory {
    portal: Arc<Mutex<Portal>>,
}

impl ScriptedFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn department(self, department: &str, communes: &[&str]) -> Self {
        self.portal.lock().unwrap().departments.push((
            department.to_string(),
            communes.iter().map(|c| c.to_string()).collect(),
        ));
        self
    }

    pub fn page(self, commune: &str, date: &str, rows: &[(&str, &str, &str)]) -> Self {
        self.tables(
            commune,
            vec![
                general_html(date),
                "<tbody><tr><td>Réseau</td></tr></tbody>".to_string(),
                results_html(rows),
            ],
        )
    }

    pub fn tables(self, commune: &str, tables: Vec<String>) -> Self {
        self.portal
            .lock()
            .unwrap()
            .pages
            .insert(commune.to_string(), tables);
        self
    }

    pub fn submits(&self) -> Vec<String> {
        self.portal.lock().unwrap().submits.clone()
    }
}

struct ScriptedSession {
    portal: Arc<Mutex<Portal>>,
    department: Option<String>,
    commune: Option<String>,
    tables: Vec<String>,
}

fn options(values: &[String]) -> String {
    let mut html = String::from("<option value=\"\">Choisir</option>");
    for value in values {
        html.push_str(&format!("<option value=\"{0}\">{0}</option>", value));
    }
    html
}

impl PortalSession for ScriptedSession {
    fn navigate(&mut self, _url: &str) -> Result<(), BrowserError> {
        self.department = None;
        self.commune = None;
        self.tables.clear();
        Ok(())
    }

    fn field_html(&mut self, field: &str) -> Result<Option<String>, BrowserError> {
        let portal = self.portal.lock().unwrap();
        if field == DEPARTMENT_FIELD {
            let departments: Vec<String> =
                portal.departments.iter().map(|(d, _)| d.clone()).collect();
            return Ok(Some(options(&departments)));
        }
        if field == COMMUNE_FIELD {
            return Ok(self.department.as_ref().and_then(|selected| {
                portal
                    .departments
                    .iter()
                    .find(|(d, _)| d == selected)
                    .map(|(_, communes)| options(communes))
            }));
        }
        Ok(None)
    }

    fn select_option(&mut self, field: &str, value: &str) -> Result<(), BrowserError> {
        if field == DEPARTMENT_FIELD {
            self.department = Some(value.to_string());
        } else {
            self.commune = Some(value.to_string());
        }
        Ok(())
    }

    fn submit(&mut self) -> Result<(), BrowserError> {
        let commune = self.commune.clone().unwrap_or_default();
        let mut portal = self.portal.lock().unwrap();
        portal.submits.push(commune.clone());
        self.tables = portal.pages.get(&commune).cloned().unwrap_or_default();
        Ok(())
    }

    fn read_tables(&mut self) -> Result<Vec<String>, BrowserError> {
        Ok(self.tables.clone())
    }
}

impl SessionFactory for ScriptedFactory {
    fn open(&self) -> Result<Box<dyn PortalSession>, BrowserError> {
        Ok(Box::new(ScriptedSession {
            portal: Arc::clone(&self.portal),
            department: None,
            commune: None,
            tables: Vec::new(),
        }))
    }
}

pub fn create_pipeline(factory: &ScriptedFactory, store: &CommuneStore) -> ScrapePipeline {
    let mut config = ConfigParameter::new();
    config.set_portal_url(PORTAL_URL.to_string());
    config.set_max_sessions(2);
    ScrapePipeline::new(config, store.clone(), Arc::new(factory.clone()))
}
