// ABOUTME: Vision analysis provider abstraction for workout screenshot extraction
// ABOUTME: Defines the AnalysisProvider trait, request types, and provider selection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Trainsheet

//! # Vision Analysis Providers
//!
//! Abstraction over the multimodal model that turns workout screenshots
//! into a structured JSON result. The provider is selected at startup via
//! the `TRAINSHEET_ANALYSIS_PROVIDER` environment variable; `gemini` is the
//! default and currently the only implementation.

pub mod gemini;
pub mod parser;
pub mod prompt;

use std::env;

use async_trait::async_trait;
use bytes::Bytes;
use tracing::info;

use crate::constants::env_vars;
use crate::errors::AppError;

pub use gemini::GeminiAnalysisProvider;

/// One uploaded image handed to the vision model
#[derive(Debug, Clone)]
pub struct ImageAttachment {
    /// MIME type as reported by the upload (e.g. `image/png`)
    pub mime_type: String,
    /// Raw image bytes
    pub data: Bytes,
}

/// Input to one analysis call: the session's images plus optional user notes
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    /// Screenshots of the same workout session
    pub images: Vec<ImageAttachment>,
    /// Free-form user notes forwarded to the model
    pub notes: Option<String>,
}

/// A multimodal model that extracts workout data from images
#[async_trait]
pub trait AnalysisProvider: Send + Sync {
    /// Provider name for logging and selection
    fn name(&self) -> &'static str;

    /// Model identifier used when none is configured
    fn default_model(&self) -> &'static str;

    /// Run the extraction and return the model's raw text response
    async fn analyze(&self, request: &AnalysisRequest) -> Result<String, AppError>;
}

/// Create the configured analysis provider
///
/// Reads `TRAINSHEET_ANALYSIS_PROVIDER`; `gemini` is the default.
///
/// # Errors
///
/// Returns an error for an unrecognized provider name or when the selected
/// provider's credentials are missing.
pub fn provider_from_env() -> Result<Box<dyn AnalysisProvider>, AppError> {
    let selected = env::var(env_vars::ANALYSIS_PROVIDER).unwrap_or_else(|_| "gemini".into());

    match selected.to_lowercase().as_str() {
        "gemini" => {
            let provider = GeminiAnalysisProvider::from_env()?;
            info!(provider = provider.name(), model = provider.default_model(),
                "Initialized analysis provider");
            Ok(Box::new(provider))
        }
        other => Err(AppError::config(format!(
            "unknown analysis provider {other:?} (supported: gemini)"
        ))),
    }
}
