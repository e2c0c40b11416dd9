// File: navigator.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

use scraper::{Html, Selector};

use crate::browser::PortalSession;
use crate::errors::NavigationError;
use crate::models::{Commune, Department};

pub const DEPARTMENT_FIELD: &str = "departement";
pub const COMMUNE_FIELD: &str = "communeDepartement";

pub fn list_departments(
    session: &mut dyn PortalSession,
) -> Result<Vec<Department>, NavigationError> {
    list_field_options(session, DEPARTMENT_FIELD)
}

/// Selects `department` and returns the communes the form then offers.
///
/// The department stays selected afterwards, so the session is ready to
/// pick one of the returned communes.
pub fn list_communes(
    session: &mut dyn PortalSession,
    department: &str,
) -> Result<Vec<Commune>, NavigationError> {
    session.select_option(DEPARTMENT_FIELD, department)?;
    list_field_options(session, COMMUNE_FIELD)
}

fn list_field_options(
    session: &mut dyn PortalSession,
    field: &str,
) -> Result<Vec<String>, NavigationError> {
    let html = session
        .field_html(field)?
        .ok_or_else(|| NavigationError::SelectorNotFound {
            field: field.to_string(),
        })?;
    Ok(parse_option_values(&html))
}

/// `value` attributes of every `<option>` in document order.
///
/// Placeholder entries (no value, or a blank one) are left out.
pub fn parse_option_values(select_html: &str) -> Vec<String> {
    let fragment = Html::parse_fragment(&format!("<select>{}</select>", select_html));
    let selector = Selector::parse("option").unwrap();

    fragment
        .select(&selector)
        .filter_map(|option| option.value().attr("value"))
        .filter(|value| !value.trim().is_empty())
        .map(str::to_string)
        .collect()
}
