// ABOUTME: Workout image upload route handler
// ABOUTME: Accepts multipart screenshots, runs analysis, and exports normalized rows
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Trainsheet

//! # Upload Route
//!
//! `POST /upload` takes one workout session as 1..N multipart image parts
//! named `images`, plus an optional `notes` text field. The handler runs
//! the full pipeline: vision analysis, lenient parsing, normalization, and
//! the spreadsheet export. An export failure does not fail the request;
//! the caller still receives the extracted data together with a visible
//! failure status.

use std::sync::Arc;

use axum::extract::{Multipart, State};
use axum::routing::post;
use axum::{Json, Router};
use serde::Serialize;
use tracing::{info, instrument, warn};

use super::ServerResources;
use crate::analysis::{AnalysisRequest, ImageAttachment};
use crate::errors::AppError;
use crate::models::AnalysisResult;
use crate::normalizer::normalize;
use crate::sheets::{provisioner, writer, ExportStatus};

/// Multipart field carrying the session screenshots
const IMAGES_FIELD: &str = "images";

/// Multipart field carrying optional user notes
const NOTES_FIELD: &str = "notes";

/// Response payload: the analysis result with the export outcome attached
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    /// Structured analysis data, echoed as extracted
    #[serde(flatten)]
    pub analysis: AnalysisResult,
    /// Human-readable export outcome
    pub export_status: String,
}

/// Upload routes implementation
pub struct UploadRoutes;

impl UploadRoutes {
    /// Create the upload route
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/upload", post(upload_handler))
            .with_state(resources)
    }
}

#[instrument(skip(resources, multipart))]
async fn upload_handler(
    State(resources): State<Arc<ServerResources>>,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let request = collect_request(multipart).await?;
    info!(
        images = request.images.len(),
        has_notes = request.notes.is_some(),
        "Received upload"
    );

    let raw = resources.analysis.analyze(&request).await?;
    let analysis = crate::analysis::parser::parse_analysis(&raw);
    let rows = normalize(&analysis, &resources.schema);

    let status = match provisioner::provision(
        resources.backend.as_ref(),
        &resources.config.sheet_target,
    )
    .await
    {
        Ok(handle) => {
            writer::export(resources.backend.as_ref(), &handle, &rows, &resources.schema).await
        }
        Err(e) => {
            warn!(error = %e, "Provisioning failed, returning analysis without export");
            ExportStatus::Failed(e.to_string())
        }
    };

    info!(workout_type = %analysis.workout_type(), status = %status, "Upload processed");

    Ok(Json(UploadResponse {
        analysis,
        export_status: status.to_string(),
    }))
}

/// Pull images and notes out of the multipart body
async fn collect_request(mut multipart: Multipart) -> Result<AnalysisRequest, AppError> {
    let mut images = Vec::new();
    let mut notes = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::invalid_input(format!("malformed multipart body: {e}")))?
    {
        match field.name() {
            Some(IMAGES_FIELD) => {
                let mime_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_owned();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::invalid_input(format!("failed to read image: {e}")))?;
                if !data.is_empty() {
                    images.push(ImageAttachment { mime_type, data });
                }
            }
            Some(NOTES_FIELD) => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::invalid_input(format!("failed to read notes: {e}")))?;
                notes = Some(text).filter(|t| !t.trim().is_empty());
            }
            _ => {}
        }
    }

    if images.is_empty() {
        return Err(AppError::invalid_input(format!(
            "at least one image part named {IMAGES_FIELD:?} is required"
        )));
    }

    Ok(AnalysisRequest { images, notes })
}
