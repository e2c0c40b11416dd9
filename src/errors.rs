// File: errors.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("failed to launch browser: {0}")]
    Launch(String),
    #[error("navigation to {url} failed: {message}")]
    Navigate { url: String, message: String },
    #[error("element `{selector}` not found")]
    ElementNotFound { selector: String },
    #[error("{action} failed: {message}")]
    Interaction { action: String, message: String },
}

impl BrowserError {
    pub fn interaction(action: &str, err: impl std::fmt::Display) -> Self {
        Self::Interaction {
            action: action.to_string(),
            message: err.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum NavigationError {
    #[error("selector `{field}` not found on portal page")]
    SelectorNotFound { field: String },
    #[error(transparent)]
    Browser(#[from] BrowserError),
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("result table #{index} missing, page has {found} table(s)")]
    MissingTable { index: usize, found: usize },
    #[error(transparent)]
    Browser(#[from] BrowserError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("raw record for `{commune}` is not valid JSON: {source}")]
    InvalidRecord {
        commune: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sled::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("stored {0} is not valid UTF-8")]
    InvalidUtf8(&'static str),
}

pub type StoreResult<T> = Result<T, StoreError>;
