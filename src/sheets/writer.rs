// ABOUTME: Header-once append flow for exporting normalized rows
// ABOUTME: Writes the schema header into empty worksheets, then batch-appends rows
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Trainsheet

//! # Export Writer
//!
//! Appends normalized rows to a provisioned worksheet. An empty worksheet
//! first receives the schema header row; all data rows of one export go out
//! in a single batched append so a session is never half-written by this
//! process. Failures degrade to an [`ExportStatus`] instead of an error so
//! the caller can still return the analysis payload.

use tracing::{info, warn};

use super::{ExportStatus, TabularBackend, TableHandle};
use crate::schema::{FlatRow, Schema};

/// Append rows to the worksheet, writing the header first if it is empty
///
/// An empty `rows` slice short-circuits to [`ExportStatus::Skipped`] without
/// touching the backend. The presence check and the header write are two
/// separate calls; concurrent first-writers can race to a duplicate header,
/// which is accepted and logged rather than locked against.
pub async fn export(
    backend: &dyn TabularBackend,
    handle: &TableHandle,
    rows: &[FlatRow],
    schema: &Schema,
) -> ExportStatus {
    if rows.is_empty() {
        return ExportStatus::Skipped;
    }

    match try_export(backend, handle, rows, schema).await {
        Ok(count) => ExportStatus::RowsWritten(count),
        Err(e) => {
            warn!(error = %e, "Export failed");
            ExportStatus::Failed(e.to_string())
        }
    }
}

async fn try_export(
    backend: &dyn TabularBackend,
    handle: &TableHandle,
    rows: &[FlatRow],
    schema: &Schema,
) -> Result<usize, crate::errors::AppError> {
    let populated = backend.row_count(handle).await?;
    if populated == 0 {
        warn!(worksheet = %handle.worksheet, "Worksheet is empty, writing header row");
        backend.append_raw(handle, &schema.header_row()).await?;
    }

    backend.append_rows(handle, rows).await?;
    info!(rows = rows.len(), worksheet = %handle.worksheet, "Appended export rows");
    Ok(rows.len())
}
