// ABOUTME: Google Sheets and Drive backed implementation of TabularBackend
// ABOUTME: Uses the Drive v3 search API and the Sheets v4 values and batchUpdate APIs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Trainsheet

//! # Google Sheets Backend
//!
//! [`TabularBackend`] implementation on top of the Google Sheets v4 and
//! Drive v3 REST APIs, authenticated with an OAuth bearer token from the
//! `GOOGLE_SHEETS_ACCESS_TOKEN` environment variable.

use std::env;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, error, instrument};

use super::{TabularBackend, TableHandle};
use crate::constants::env_vars;
use crate::errors::{AppError, ErrorCode};
use crate::schema::FlatRow;

/// Base URL for the Sheets v4 API
const SHEETS_BASE_URL: &str = "https://sheets.googleapis.com/v4/spreadsheets";

/// Base URL for the Drive v3 files API
const DRIVE_BASE_URL: &str = "https://www.googleapis.com/drive/v3/files";

// ============================================================================
// API Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
struct DriveFileList {
    #[serde(default)]
    files: Vec<DriveFile>,
}

#[derive(Debug, Deserialize)]
struct DriveFile {
    id: String,
}

#[derive(Debug, Serialize)]
struct CreateSpreadsheetRequest {
    properties: SpreadsheetProperties,
}

#[derive(Debug, Serialize)]
struct SpreadsheetProperties {
    title: String,
}

#[derive(Debug, Deserialize)]
struct CreateSpreadsheetResponse {
    #[serde(rename = "spreadsheetId")]
    spreadsheet_id: String,
}

#[derive(Debug, Deserialize)]
struct SpreadsheetMetadata {
    #[serde(default)]
    sheets: Vec<SheetEntry>,
}

#[derive(Debug, Deserialize)]
struct SheetEntry {
    properties: SheetProperties,
}

#[derive(Debug, Deserialize)]
struct SheetProperties {
    title: String,
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<serde_json::Value>>,
}

#[derive(Debug, Deserialize)]
struct GoogleErrorResponse {
    error: Option<GoogleErrorBody>,
}

#[derive(Debug, Deserialize)]
struct GoogleErrorBody {
    message: String,
}

// ============================================================================
// Backend
// ============================================================================

/// Google-hosted spreadsheet backend
pub struct GoogleSheetsBackend {
    client: Client,
    access_token: String,
}

impl std::fmt::Debug for GoogleSheetsBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleSheetsBackend")
            .field("access_token", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl GoogleSheetsBackend {
    /// Create a backend with an explicit access token
    #[must_use]
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            access_token: access_token.into(),
        }
    }

    /// Create a backend from the `GOOGLE_SHEETS_ACCESS_TOKEN` environment
    /// variable
    ///
    /// # Errors
    ///
    /// Returns an error if the environment variable is not set.
    pub fn from_env() -> Result<Self, AppError> {
        let access_token = env::var(env_vars::SHEETS_ACCESS_TOKEN).map_err(|_| {
            AppError::config(format!(
                "{} environment variable not set",
                env_vars::SHEETS_ACCESS_TOKEN
            ))
        })?;
        Ok(Self::new(access_token))
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, AppError> {
        let response = self
            .client
            .get(url)
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(|e| AppError::internal(format!("HTTP request failed: {e}")))?;

        Self::read_json(response).await
    }

    async fn post_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> Result<T, AppError> {
        let response = self
            .client
            .post(url)
            .bearer_auth(&self.access_token)
            .json(body)
            .send()
            .await
            .map_err(|e| AppError::internal(format!("HTTP request failed: {e}")))?;

        Self::read_json(response).await
    }

    async fn read_json<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, AppError> {
        let status = response.status();
        let response_text = response
            .text()
            .await
            .map_err(|e| AppError::internal(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            error!(status = %status, "Google API error");
            return Err(Self::map_api_error(status.as_u16(), &response_text));
        }

        serde_json::from_str(&response_text).map_err(|e| {
            error!(error = %e, "Failed to parse Google API response");
            AppError::internal(format!("Failed to parse Google API response: {e}"))
        })
    }

    /// Map API error status to appropriate error type
    fn map_api_error(status: u16, response_text: &str) -> AppError {
        let message = serde_json::from_str::<GoogleErrorResponse>(response_text)
            .ok()
            .and_then(|r| r.error)
            .map_or_else(|| response_text.to_owned(), |e| e.message);

        match status {
            401 | 403 => AppError::new(
                ErrorCode::ExternalAuthFailed,
                format!("Google API auth failed ({status}): {message}"),
            ),
            429 => AppError::new(
                ErrorCode::ExternalRateLimited,
                format!("Google API rate limited: {message}"),
            ),
            500..=599 => AppError::new(
                ErrorCode::ExternalServiceUnavailable,
                format!("Google API unavailable ({status}): {message}"),
            ),
            _ => AppError::external_service("google", format!("({status}): {message}")),
        }
    }

    /// Escape a name for embedding in a Drive `q` search expression
    fn escape_query_name(name: &str) -> String {
        name.replace('\\', "\\\\").replace('\'', "\\'")
    }
}

#[async_trait]
impl TabularBackend for GoogleSheetsBackend {
    #[instrument(skip(self))]
    async fn find_spreadsheet(&self, name: &str) -> Result<Option<String>, AppError> {
        let query = format!(
            "name = '{}' and mimeType = 'application/vnd.google-apps.spreadsheet' and trashed = false",
            Self::escape_query_name(name)
        );
        let url = format!(
            "{DRIVE_BASE_URL}?q={}&fields=files(id)&pageSize=1",
            urlencoding::encode(&query)
        );

        let list: DriveFileList = self.get_json(&url).await?;
        let found = list.files.into_iter().next().map(|f| f.id);
        debug!(found = found.is_some(), "Spreadsheet lookup finished");
        Ok(found)
    }

    #[instrument(skip(self))]
    async fn create_spreadsheet(&self, name: &str) -> Result<String, AppError> {
        let request = CreateSpreadsheetRequest {
            properties: SpreadsheetProperties {
                title: name.to_owned(),
            },
        };
        let body = serde_json::to_value(&request)
            .map_err(|e| AppError::internal(format!("Failed to encode request: {e}")))?;

        let created: CreateSpreadsheetResponse = self.post_json(SHEETS_BASE_URL, &body).await?;
        debug!(spreadsheet_id = %created.spreadsheet_id, "Created spreadsheet");
        Ok(created.spreadsheet_id)
    }

    #[instrument(skip(self, email))]
    async fn share_spreadsheet(&self, spreadsheet_id: &str, email: &str) -> Result<(), AppError> {
        let url = format!("{DRIVE_BASE_URL}/{spreadsheet_id}/permissions");
        let body = json!({
            "type": "user",
            "role": "writer",
            "emailAddress": email,
        });

        let _: serde_json::Value = self.post_json(&url, &body).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn worksheet_exists(
        &self,
        spreadsheet_id: &str,
        title: &str,
    ) -> Result<bool, AppError> {
        let url = format!("{SHEETS_BASE_URL}/{spreadsheet_id}?fields=sheets.properties.title");
        let metadata: SpreadsheetMetadata = self.get_json(&url).await?;
        Ok(metadata
            .sheets
            .iter()
            .any(|sheet| sheet.properties.title == title))
    }

    #[instrument(skip(self))]
    async fn create_worksheet(&self, spreadsheet_id: &str, title: &str) -> Result<(), AppError> {
        let url = format!("{SHEETS_BASE_URL}/{spreadsheet_id}:batchUpdate");
        let body = json!({
            "requests": [
                { "addSheet": { "properties": { "title": title } } }
            ]
        });

        let _: serde_json::Value = self.post_json(&url, &body).await?;
        Ok(())
    }

    #[instrument(skip(self, handle), fields(worksheet = %handle.worksheet))]
    async fn row_count(&self, handle: &TableHandle) -> Result<usize, AppError> {
        let url = format!(
            "{SHEETS_BASE_URL}/{}/values/{}!A:A",
            handle.spreadsheet_id,
            urlencoding::encode(&handle.worksheet)
        );
        let range: ValueRange = self.get_json(&url).await?;
        Ok(range.values.len())
    }

    #[instrument(skip(self, handle, row), fields(worksheet = %handle.worksheet))]
    async fn append_raw(&self, handle: &TableHandle, row: &[String]) -> Result<(), AppError> {
        let url = format!(
            "{SHEETS_BASE_URL}/{}/values/{}!A1:append?valueInputOption=USER_ENTERED",
            handle.spreadsheet_id,
            urlencoding::encode(&handle.worksheet)
        );
        let body = json!({ "values": [row] });

        let _: serde_json::Value = self.post_json(&url, &body).await?;
        Ok(())
    }

    #[instrument(skip(self, handle, rows), fields(worksheet = %handle.worksheet, rows = rows.len()))]
    async fn append_rows(&self, handle: &TableHandle, rows: &[FlatRow]) -> Result<(), AppError> {
        let url = format!(
            "{SHEETS_BASE_URL}/{}/values/{}!A1:append?valueInputOption=USER_ENTERED",
            handle.spreadsheet_id,
            urlencoding::encode(&handle.worksheet)
        );
        let values: Vec<Vec<serde_json::Value>> =
            rows.iter().map(FlatRow::to_json_row).collect();
        let body = json!({ "values": values });

        let _: serde_json::Value = self.post_json(&url, &body).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_name_escaping() {
        assert_eq!(
            GoogleSheetsBackend::escape_query_name("Bob's Log"),
            "Bob\\'s Log"
        );
        assert_eq!(GoogleSheetsBackend::escape_query_name("plain"), "plain");
    }

    #[test]
    fn test_map_api_error_classification() {
        let err = GoogleSheetsBackend::map_api_error(401, "{\"error\":{\"message\":\"bad token\"}}");
        assert_eq!(err.code, ErrorCode::ExternalAuthFailed);
        assert!(err.message.contains("bad token"));

        let err = GoogleSheetsBackend::map_api_error(429, "slow down");
        assert_eq!(err.code, ErrorCode::ExternalRateLimited);

        let err = GoogleSheetsBackend::map_api_error(503, "upstream");
        assert_eq!(err.code, ErrorCode::ExternalServiceUnavailable);

        let err = GoogleSheetsBackend::map_api_error(404, "missing");
        assert_eq!(err.code, ErrorCode::ExternalServiceError);
    }
}
