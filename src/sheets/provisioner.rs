// ABOUTME: Idempotent resolve-or-create flow for the backing spreadsheet
// ABOUTME: Finds or creates the spreadsheet and worksheet named in the config
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Trainsheet

//! # Table Provisioner
//!
//! Resolves the configured spreadsheet and worksheet by name, creating
//! whichever of the two does not exist yet. Running this repeatedly against
//! the same names settles on the same [`TableHandle`] without creating
//! duplicates. Sharing only happens on the create path; an existing
//! spreadsheet keeps whatever permissions it already has.

use tracing::{info, warn};

use super::{TabularBackend, TableHandle};
use crate::config::SheetTargetConfig;
use crate::errors::AppError;

/// Resolve or create the backing table named by the configuration
///
/// # Errors
///
/// Returns an error when the configured spreadsheet name is empty or when
/// any backend call fails.
pub async fn provision(
    backend: &dyn TabularBackend,
    target: &SheetTargetConfig,
) -> Result<TableHandle, AppError> {
    if target.spreadsheet_name.trim().is_empty() {
        return Err(AppError::provisioning("spreadsheet name is empty"));
    }
    if target.worksheet_name.trim().is_empty() {
        return Err(AppError::provisioning("worksheet name is empty"));
    }

    let spreadsheet_id = match backend.find_spreadsheet(&target.spreadsheet_name).await? {
        Some(id) => {
            info!(spreadsheet = %target.spreadsheet_name, "Resolved existing spreadsheet");
            id
        }
        None => {
            let id = backend.create_spreadsheet(&target.spreadsheet_name).await?;
            info!(spreadsheet = %target.spreadsheet_name, "Created spreadsheet");

            if let Some(email) = &target.share_with {
                // A share failure leaves a usable but possibly invisible
                // document; surface it loudly instead of failing the upload.
                if let Err(e) = backend.share_spreadsheet(&id, email).await {
                    warn!(error = %e, "Failed to share newly created spreadsheet");
                }
            }
            id
        }
    };

    if !backend
        .worksheet_exists(&spreadsheet_id, &target.worksheet_name)
        .await?
    {
        backend
            .create_worksheet(&spreadsheet_id, &target.worksheet_name)
            .await?;
        info!(worksheet = %target.worksheet_name, "Created worksheet");
    }

    Ok(TableHandle {
        spreadsheet_id,
        worksheet: target.worksheet_name.clone(),
    })
}
