// ABOUTME: Google Gemini vision provider for workout screenshot analysis
// ABOUTME: Sends images inline via the generateContent API and returns the raw text reply
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Trainsheet

//! # Gemini Analysis Provider
//!
//! [`AnalysisProvider`] implementation for Google's Gemini multimodal
//! models via the Generative AI API.
//!
//! ## Configuration
//!
//! Set the `GEMINI_API_KEY` environment variable with your API key from
//! Google AI Studio. `TRAINSHEET_GEMINI_MODEL` overrides the model.

use std::env;
use std::fmt::{Debug, Formatter, Result as FmtResult};

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};

use super::{AnalysisProvider, AnalysisRequest};
use crate::constants::env_vars;
use crate::errors::{AppError, ErrorCode};

/// Default model to use
const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Base URL for the Gemini API
const API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

// ============================================================================
// API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
}

#[derive(Debug, Serialize)]
struct GeminiContent {
    parts: Vec<ContentPart>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum ContentPart {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

#[derive(Debug, Serialize)]
struct InlineData {
    #[serde(rename = "mimeType")]
    mime_type: String,
    data: String,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    error: Option<GeminiError>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    message: String,
}

// ============================================================================
// Provider
// ============================================================================

/// Gemini-backed vision analysis provider
pub struct GeminiAnalysisProvider {
    client: Client,
    api_key: String,
    model: String,
}

impl Debug for GeminiAnalysisProvider {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("GeminiAnalysisProvider")
            .field("model", &self.model)
            .field("api_key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl GeminiAnalysisProvider {
    /// Create a provider with an explicit API key and model
    #[must_use]
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    /// Create a provider from `GEMINI_API_KEY`, honoring the
    /// `TRAINSHEET_GEMINI_MODEL` override
    ///
    /// # Errors
    ///
    /// Returns an error if the API key environment variable is not set.
    pub fn from_env() -> Result<Self, AppError> {
        let api_key = env::var(env_vars::GEMINI_API_KEY).map_err(|_| {
            AppError::config(format!(
                "{} environment variable not set",
                env_vars::GEMINI_API_KEY
            ))
        })?;
        let model =
            env::var(env_vars::GEMINI_MODEL).unwrap_or_else(|_| DEFAULT_MODEL.to_owned());
        Ok(Self::new(api_key, model))
    }

    fn build_request(request: &AnalysisRequest) -> GeminiRequest {
        let mut parts = vec![ContentPart::Text {
            text: super::prompt::build_prompt(request.notes.as_deref()),
        }];
        parts.extend(request.images.iter().map(|image| ContentPart::InlineData {
            inline_data: InlineData {
                mime_type: image.mime_type.clone(),
                data: BASE64.encode(&image.data),
            },
        }));

        GeminiRequest {
            contents: vec![GeminiContent { parts }],
        }
    }

    fn extract_text(response: GeminiResponse) -> Result<String, AppError> {
        if let Some(error) = response.error {
            return Err(AppError::internal(format!(
                "Gemini API error: {}",
                error.message
            )));
        }

        response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|content| {
                content
                    .parts
                    .into_iter()
                    .find_map(|part| part.text.filter(|t| !t.is_empty()))
            })
            .ok_or_else(|| AppError::internal("Gemini response contained no text"))
    }

    /// Map API error status to appropriate error type
    fn map_api_error(status: u16, response_text: &str) -> AppError {
        let message = serde_json::from_str::<GeminiResponse>(response_text)
            .ok()
            .and_then(|r| r.error)
            .map_or_else(|| response_text.to_owned(), |e| e.message);

        match status {
            401 | 403 => AppError::new(
                ErrorCode::ExternalAuthFailed,
                format!("Gemini auth failed ({status}): {message}"),
            ),
            429 => AppError::new(
                ErrorCode::ExternalRateLimited,
                format!("Gemini rate limited: {message}"),
            ),
            500..=599 => AppError::new(
                ErrorCode::ExternalServiceUnavailable,
                format!("Gemini unavailable ({status}): {message}"),
            ),
            _ => AppError::internal(format!("Gemini API error ({status}): {message}")),
        }
    }
}

#[async_trait]
impl AnalysisProvider for GeminiAnalysisProvider {
    fn name(&self) -> &'static str {
        "gemini"
    }

    fn default_model(&self) -> &'static str {
        DEFAULT_MODEL
    }

    #[instrument(skip(self, request), fields(model = %self.model, images = request.images.len()))]
    async fn analyze(&self, request: &AnalysisRequest) -> Result<String, AppError> {
        let url = format!(
            "{API_BASE_URL}/models/{}:generateContent?key={}",
            self.model, self.api_key
        );
        let gemini_request = Self::build_request(request);

        debug!("Sending analysis request to Gemini API");

        let response = self
            .client
            .post(&url)
            .json(&gemini_request)
            .send()
            .await
            .map_err(|e| AppError::internal(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .map_err(|e| AppError::internal(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            error!(status = %status, "Gemini API error");
            return Err(Self::map_api_error(status.as_u16(), &response_text));
        }

        let gemini_response: GeminiResponse =
            serde_json::from_str(&response_text).map_err(|e| {
                error!(error = %e, "Failed to parse Gemini response");
                AppError::internal(format!("Failed to parse Gemini response: {e}"))
            })?;

        let text = Self::extract_text(gemini_response)?;
        debug!(chars = text.len(), "Received analysis text from Gemini");
        Ok(text)
    }
}
