// File: lib.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2023-2025
// - Volker Schwaberow <volker@schwaberow.de>

#![allow(clippy::uninlined_format_args)]
#![allow(clippy::bool_assert_comparison)]
#![allow(clippy::new_without_default)]

pub mod browser;
pub mod cli;
pub mod commands;
pub mod compiler;
pub mod config;
pub mod errors;
pub mod fetcher;
pub mod models;
pub mod navigator;
pub mod pipeline;
pub mod report;
pub mod scrapestate;
pub mod server;
pub mod storage;

#[cfg(test)]
mod test_support;
