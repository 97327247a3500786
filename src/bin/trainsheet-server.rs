// ABOUTME: Server binary for the trainsheet workout export service
// ABOUTME: Wires configuration, logging, providers, and the axum router together
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Trainsheet

//! # Trainsheet Server Binary
//!
//! Starts the HTTP service: loads configuration from the environment,
//! initializes structured logging, constructs the analysis provider and
//! the spreadsheet backend, and serves the upload API.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;

use trainsheet::analysis;
use trainsheet::config::ServerConfig;
use trainsheet::logging;
use trainsheet::routes::{self, ServerResources};
use trainsheet::sheets::GoogleSheetsBackend;

#[derive(Parser)]
#[command(name = "trainsheet-server")]
#[command(about = "Trainsheet - workout screenshot analysis and spreadsheet export")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }

    logging::init_from_env()?;

    info!("Starting Trainsheet server");
    info!("{}", config.summary());

    let analysis = analysis::provider_from_env()?;
    let backend = GoogleSheetsBackend::from_env()?;
    let resources = Arc::new(ServerResources::new(analysis, Arc::new(backend), config));

    let app = routes::router(Arc::clone(&resources));

    let addr = format!("0.0.0.0:{}", resources.config.http_port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Listening on {addr}");
    info!("Upload endpoint: POST /upload (multipart, field \"images\")");

    axum::serve(listener, app).await?;

    Ok(())
}
