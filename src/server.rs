// File: server.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use log::{error, info};
use std::net::SocketAddr;
use thiserror::Error;
use tokio::net::TcpListener;

use crate::compiler::{CompileSummary, RecordCompiler};
use crate::models::CompiledCommuneRecord;
use crate::pipeline::ScrapePipeline;
use crate::storage::CommuneStore;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("invalid listen address `{address}`: {source}")]
    InvalidListenAddr {
        address: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("failed to bind to {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },
    #[error("server error: {source}")]
    Serve {
        #[source]
        source: std::io::Error,
    },
}

#[derive(Clone)]
pub struct AppState {
    store: CommuneStore,
    pipeline: ScrapePipeline,
}

impl AppState {
    pub fn new(store: CommuneStore, pipeline: ScrapePipeline) -> Self {
        Self { store, pipeline }
    }
}

type ApiError = (StatusCode, String);

fn internal(err: impl std::fmt::Display) -> ApiError {
    error!("Request failed: {}", err);
    (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(list_compiled))
        .route("/scrap", get(trigger_scrape))
        .route("/compute", get(compute))
        .route("/log", post(log_line))
        .with_state(state)
}

async fn list_compiled(
    State(state): State<AppState>,
) -> Result<Json<Vec<CompiledCommuneRecord>>, ApiError> {
    let store = state.store.clone();
    let records = tokio::task::spawn_blocking(move || store.compiled_records())
        .await
        .map_err(internal)?
        .map_err(internal)?;
    Ok(Json(records))
}

/// Answers right away; the scrape keeps running in the background.
async fn trigger_scrape(State(state): State<AppState>) -> StatusCode {
    let pipeline = state.pipeline.clone();
    tokio::spawn(async move {
        match pipeline.run().await {
            Ok(stats) => info!(
                "Scrape finished: {} fetched, {} skipped, {} failed communes, {} failed departments",
                stats.fetched(),
                stats.skipped(),
                stats.failed_communes().len(),
                stats.failed_departments().len()
            ),
            Err(e) => error!("Scrape aborted: {}", e),
        }
    });
    StatusCode::NO_CONTENT
}

async fn compute(State(state): State<AppState>) -> Result<Json<CompileSummary>, ApiError> {
    let compiler = RecordCompiler::new(state.store.clone());
    let summary = tokio::task::spawn_blocking(move || compiler.compile_all())
        .await
        .map_err(internal)?
        .map_err(internal)?;
    Ok(Json(summary))
}

async fn log_line(body: String) -> StatusCode {
    info!("{}", body);
    StatusCode::CREATED
}

pub fn parse_listen_addr(addr: &str) -> Result<SocketAddr, ServerError> {
    let trimmed = addr.trim();
    trimmed
        .parse()
        .map_err(|source| ServerError::InvalidListenAddr {
            address: trimmed.to_string(),
            source,
        })
}

pub async fn serve(listen_addr: &str, state: AppState) -> Result<(), ServerError> {
    let addr = parse_listen_addr(listen_addr)?;
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind {
            address: addr.to_string(),
            source,
        })?;

    info!("Listening on {}", addr);

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!("Failed to listen for Ctrl+C: {}", e);
                std::future::pending::<()>().await;
            }
        })
        .await
        .map_err(|source| ServerError::Serve { source })?;

    info!("Server stopped");
    Ok(())
}
