// ABOUTME: Route module organization for the trainsheet HTTP endpoints
// ABOUTME: Holds shared server resources and assembles the axum router with middleware
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Trainsheet

//! Route module for the trainsheet server
//!
//! Organizes HTTP routes by domain. Each domain module contains route
//! definitions and thin handler functions that delegate to the analysis,
//! normalization, and export layers.

/// Health check and system status routes
pub mod health;
/// Workout image upload and export route
pub mod upload;

use std::sync::Arc;
use std::time::Duration;

use axum::extract::DefaultBodyLimit;
use axum::Router;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::analysis::AnalysisProvider;
use crate::config::ServerConfig;
use crate::schema::Schema;
use crate::sheets::TabularBackend;

pub use health::HealthRoutes;
pub use upload::UploadRoutes;

/// Upper bound on one request, covering the vision model round trip
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Shared dependencies handed to every handler
pub struct ServerResources {
    /// Vision analysis provider
    pub analysis: Box<dyn AnalysisProvider>,
    /// Tabular export backend
    pub backend: Arc<dyn TabularBackend>,
    /// Committed export schema
    pub schema: Schema,
    /// Server configuration
    pub config: ServerConfig,
}

impl ServerResources {
    /// Bundle the server's dependencies
    #[must_use]
    pub fn new(
        analysis: Box<dyn AnalysisProvider>,
        backend: Arc<dyn TabularBackend>,
        config: ServerConfig,
    ) -> Self {
        Self {
            analysis,
            backend,
            schema: Schema::workout_columns(),
            config,
        }
    }
}

/// Assemble the full application router
#[must_use]
pub fn router(resources: Arc<ServerResources>) -> Router {
    let max_upload_bytes = resources.config.max_upload_bytes;

    Router::new()
        .merge(HealthRoutes::routes())
        .merge(UploadRoutes::routes(resources))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(crate::middleware::setup_cors())
        .layer(DefaultBodyLimit::max(max_upload_bytes))
}
