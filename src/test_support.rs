// File: test_support.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex};

use crate::browser::{PortalSession, SessionFactory, SEARCH_BUTTON};
use crate::errors::BrowserError;
use crate::navigator::{COMMUNE_FIELD, DEPARTMENT_FIELD};

pub fn general_table(date: &str) -> String {
    format!(
        "<tbody><tr><td>{}</td></tr><tr><td>Conformité</td><td>oui</td></tr></tbody>",
        date
    )
}

pub fn results_table(rows: &[(&str, &str, &str)]) -> String {
    let body: String = rows
        .iter()
        .map(|(key, value, max)| format!("<tr><td>{}</td><td>{}</td><td>{}</td></tr>", key, value, max))
        .collect();
    format!(
        "<thead><tr><th>Paramètre</th><th>Valeur</th><th>Limite</th></tr></thead><tbody>{}</tbody>",
        body
    )
}

/// Tables the portal renders after a successful search.
pub fn result_page(date: &str, rows: &[(&str, &str, &str)]) -> Vec<String> {
    vec![
        general_table(date),
        "<tbody><tr><td>filler</td></tr></tbody>".to_string(),
        results_table(rows),
    ]
}

#[derive(Clone, Default)]
struct PortalModel {
    departments: Vec<(String, Vec<String>)>,
    pages: BTreeMap<String, Vec<String>>,
    hide_department_selector: bool,
    hide_commune_selector: BTreeSet<String>,
}

/// Scripted stand-in for the portal. Every interaction is appended to a
/// shared journal so tests can assert what was (not) navigated.
#[derive(Clone, Default)]
pub struct FakePortal {
    model: PortalModel,
    journal: Arc<Mutex<Vec<String>>>,
    department: Option<String>,
    commune: Option<String>,
    tables: Vec<String>,
}

impl FakePortal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_department(mut self, department: &str, communes: &[&str]) -> Self {
        for commune in communes {
            self.model
                .pages
                .entry(commune.to_string())
                .or_insert_with(|| result_page("01/01/2024", &[("pH", "7.0", "9.0")]));
        }
        self.model.departments.push((
            department.to_string(),
            communes.iter().map(|c| c.to_string()).collect(),
        ));
        self
    }

    pub fn with_page(mut self, commune: &str, tables: Vec<String>) -> Self {
        self.model.pages.insert(commune.to_string(), tables);
        self
    }

    pub fn without_department_selector(mut self) -> Self {
        self.model.hide_department_selector = true;
        self
    }

    /// Selecting `department` still works, but the page then renders no
    /// commune selector.
    pub fn without_commune_selector_for(mut self, department: &str) -> Self {
        self.model
            .hide_commune_selector
            .insert(department.to_string());
        self
    }

    pub fn journal(&self) -> Vec<String> {
        self.journal.lock().unwrap().clone()
    }

    fn record(&self, entry: String) {
        self.journal.lock().unwrap().push(entry);
    }

    fn options_html(values: &[String]) -> String {
        let mut html = String::from("<option value=\"\">--</option>");
        for value in values {
            html.push_str(&format!("<option value=\"{}\">{}</option>", value, value));
        }
        html
    }
}

impl PortalSession for FakePortal {
    fn navigate(&mut self, url: &str) -> Result<(), BrowserError> {
        self.record(format!("navigate {}", url));
        self.department = None;
        self.commune = None;
        self.tables.clear();
        Ok(())
    }

    fn field_html(&mut self, field: &str) -> Result<Option<String>, BrowserError> {
        match field {
            DEPARTMENT_FIELD if !self.model.hide_department_selector => {
                let values: Vec<String> =
                    self.model.departments.iter().map(|(d, _)| d.clone()).collect();
                Ok(Some(Self::options_html(&values)))
            }
            COMMUNE_FIELD => Ok(self
                .department
                .as_ref()
                .filter(|selected| !self.model.hide_commune_selector.contains(*selected))
                .and_then(|selected| {
                    self.model
                        .departments
                        .iter()
                        .find(|(d, _)| d == selected)
                        .map(|(_, communes)| Self::options_html(communes))
                })),
            _ => Ok(None),
        }
    }

    fn select_option(&mut self, field: &str, value: &str) -> Result<(), BrowserError> {
        self.record(format!("select {}={}", field, value));
        let not_found = || BrowserError::ElementNotFound {
            selector: format!("[name='{}'] option[value='{}']", field, value),
        };

        match field {
            DEPARTMENT_FIELD => {
                if !self.model.departments.iter().any(|(d, _)| d == value) {
                    return Err(not_found());
                }
                self.department = Some(value.to_string());
                self.commune = None;
            }
            COMMUNE_FIELD => {
                let offered = self
                    .department
                    .as_ref()
                    .and_then(|selected| self.model.departments.iter().find(|(d, _)| d == selected))
                    .map(|(_, communes)| communes.iter().any(|c| c == value))
                    .unwrap_or(false);
                if !offered {
                    return Err(not_found());
                }
                self.commune = Some(value.to_string());
            }
            _ => return Err(not_found()),
        }
        Ok(())
    }

    fn submit(&mut self) -> Result<(), BrowserError> {
        self.record("submit".to_string());
        let commune = self.commune.clone().ok_or_else(|| BrowserError::ElementNotFound {
            selector: format!("[name='{}']", SEARCH_BUTTON),
        })?;
        self.tables = self.model.pages.get(&commune).cloned().unwrap_or_default();
        Ok(())
    }

    fn read_tables(&mut self) -> Result<Vec<String>, BrowserError> {
        Ok(self.tables.clone())
    }

    fn close(&mut self) -> Result<(), BrowserError> {
        self.record("close".to_string());
        Ok(())
    }
}

/// Hands out fresh sessions that share one model and one journal.
#[derive(Clone)]
pub struct FakeFactory {
    template: FakePortal,
    opened: Arc<Mutex<usize>>,
}

impl FakeFactory {
    pub fn new(template: FakePortal) -> Self {
        Self {
            template,
            opened: Arc::new(Mutex::new(0)),
        }
    }

    pub fn opened(&self) -> usize {
        *self.opened.lock().unwrap()
    }

    pub fn journal(&self) -> Vec<String> {
        self.template.journal()
    }
}

impl SessionFactory for FakeFactory {
    fn open(&self) -> Result<Box<dyn PortalSession>, BrowserError> {
        *self.opened.lock().unwrap() += 1;
        Ok(Box::new(self.template.clone()))
    }
}
