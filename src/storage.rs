// File: storage.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2023-2025
// - Volker Schwaberow <volker@schwaberow.de>

use anyhow::{Context, Result};
use dirs::data_local_dir;
use serde::Serialize;
use sled::{Config, Db, Tree};
use std::path::PathBuf;

use crate::errors::{StoreError, StoreResult};
use crate::models::{CompiledCommuneRecord, RawCommuneRecord};

const RAW_TREE: &str = "communes-raw-table";
const COMPILED_TREE: &str = "communes";

/// Logical hash namespaces inside the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Namespace {
    Raw,
    Compiled,
}

impl Namespace {
    pub fn tree_name(self) -> &'static str {
        match self {
            Namespace::Raw => RAW_TREE,
            Namespace::Compiled => COMPILED_TREE,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StoreStats {
    pub raw_count: usize,
    pub compiled_count: usize,
    pub pending_compile: usize,
    pub size_bytes: u64,
}

/// Handle to the commune cache. Cloning shares the underlying database.
#[derive(Clone)]
pub struct CommuneStore {
    db: Db,
    raw_tree: Tree,
    compiled_tree: Tree,
}

impl CommuneStore {
    pub fn new(data_dir: Option<PathBuf>) -> Result<Self> {
        let db_path = match data_dir {
            Some(dir) => dir.join("eaux_store"),
            None => data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("eaux")
                .join("store"),
        };

        std::fs::create_dir_all(&db_path).context("Failed to create database directory")?;

        let db = Config::default()
            .path(&db_path)
            .open()
            .context("Failed to open database")?;

        Self::from_db(db)
    }

    /// In-memory store that disappears on drop.
    pub fn temporary() -> Result<Self> {
        let db = Config::new()
            .temporary(true)
            .open()
            .context("Failed to open temporary database")?;
        Self::from_db(db)
    }

    fn from_db(db: Db) -> Result<Self> {
        let raw_tree = db
            .open_tree(RAW_TREE)
            .context("Failed to open raw tree")?;
        let compiled_tree = db
            .open_tree(COMPILED_TREE)
            .context("Failed to open compiled tree")?;

        Ok(Self {
            db,
            raw_tree,
            compiled_tree,
        })
    }

    fn tree(&self, namespace: Namespace) -> &Tree {
        match namespace {
            Namespace::Raw => &self.raw_tree,
            Namespace::Compiled => &self.compiled_tree,
        }
    }

    /// Sets a field, overwriting any previous value.
    pub fn set(&self, namespace: Namespace, commune: &str, json: &str) -> StoreResult<()> {
        self.tree(namespace)
            .insert(commune.as_bytes(), json.as_bytes())?;
        Ok(())
    }

    pub fn exists(&self, namespace: Namespace, commune: &str) -> StoreResult<bool> {
        Ok(self.tree(namespace).contains_key(commune.as_bytes())?)
    }

    pub fn get(&self, namespace: Namespace, commune: &str) -> StoreResult<Option<String>> {
        match self.tree(namespace).get(commune.as_bytes())? {
            Some(value) => Ok(Some(decode_utf8(value.to_vec(), "value")?)),
            None => Ok(None),
        }
    }

    /// All `(commune, json)` pairs of a namespace in key order.
    pub fn get_all(&self, namespace: Namespace) -> StoreResult<Vec<(String, String)>> {
        let mut entries = Vec::new();

        for result in self.tree(namespace).iter() {
            let (key, value) = result?;
            entries.push((
                decode_utf8(key.to_vec(), "key")?,
                decode_utf8(value.to_vec(), "value")?,
            ));
        }

        Ok(entries)
    }

    pub fn len(&self, namespace: Namespace) -> usize {
        self.tree(namespace).len()
    }

    pub fn is_empty(&self, namespace: Namespace) -> bool {
        self.tree(namespace).is_empty()
    }

    pub fn put_raw(&self, record: &RawCommuneRecord) -> StoreResult<()> {
        let json = serde_json::to_string(record)?;
        self.set(Namespace::Raw, &record.commune, &json)
    }

    pub fn put_compiled(&self, record: &CompiledCommuneRecord) -> StoreResult<()> {
        let json = serde_json::to_string(record)?;
        self.set(Namespace::Compiled, &record.commune, &json)
    }

    pub fn raw_record(&self, commune: &str) -> StoreResult<Option<RawCommuneRecord>> {
        match self.get(Namespace::Raw, commune)? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    pub fn compiled_record(&self, commune: &str) -> StoreResult<Option<CompiledCommuneRecord>> {
        match self.get(Namespace::Compiled, commune)? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    pub fn compiled_records(&self) -> StoreResult<Vec<CompiledCommuneRecord>> {
        self.get_all(Namespace::Compiled)?
            .into_iter()
            .map(|(_, json)| serde_json::from_str(&json).map_err(StoreError::from))
            .collect()
    }

    pub fn stats(&self) -> StoreResult<StoreStats> {
        let mut pending_compile = 0;
        for result in self.raw_tree.iter() {
            let (key, _) = result?;
            if !self.compiled_tree.contains_key(&key)? {
                pending_compile += 1;
            }
        }

        Ok(StoreStats {
            raw_count: self.raw_tree.len(),
            compiled_count: self.compiled_tree.len(),
            pending_compile,
            size_bytes: self.db.size_on_disk()?,
        })
    }

    pub fn flush(&self) -> StoreResult<()> {
        self.db.flush()?;
        Ok(())
    }
}

fn decode_utf8(bytes: Vec<u8>, what: &'static str) -> StoreResult<String> {
    String::from_utf8(bytes).map_err(|_| StoreError::InvalidUtf8(what))
}
