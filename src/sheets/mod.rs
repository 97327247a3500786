// ABOUTME: Tabular export backend abstraction and shared export types
// ABOUTME: Defines the TabularBackend trait, table handles, and export status
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Trainsheet

//! # Tabular Export Backends
//!
//! Abstraction over the spreadsheet service the export rows land in. The
//! [`TabularBackend`] trait covers lookup, creation, sharing, and append
//! primitives; [`provisioner`] and [`writer`] implement the idempotent
//! resolve-or-create and header-once append flows on top of it.

pub mod google;
pub mod provisioner;
pub mod writer;

use std::fmt::{Display, Formatter, Result as FmtResult};

use async_trait::async_trait;

use crate::errors::AppError;
use crate::schema::FlatRow;

pub use google::GoogleSheetsBackend;

/// Resolved identity of the worksheet rows are appended to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableHandle {
    /// Backend identifier of the spreadsheet document
    pub spreadsheet_id: String,
    /// Worksheet (tab) title inside the document
    pub worksheet: String,
}

/// Outcome of one export attempt, reported back to the uploader
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportStatus {
    /// Rows were appended successfully
    RowsWritten(usize),
    /// Provisioning or the append itself failed; analysis data is still
    /// returned to the caller
    Failed(String),
    /// Nothing to export, no backend calls were made
    Skipped,
}

impl Display for ExportStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::RowsWritten(count) => {
                let plural = if *count == 1 { "" } else { "s" };
                write!(f, "{count} row{plural} written")
            }
            Self::Failed(reason) => write!(f, "export failed: {reason}"),
            Self::Skipped => write!(f, "skipped: nothing to export"),
        }
    }
}

/// Backend primitives for a spreadsheet-like tabular store
#[async_trait]
pub trait TabularBackend: Send + Sync {
    /// Find a spreadsheet by exact name, returning its identifier
    async fn find_spreadsheet(&self, name: &str) -> Result<Option<String>, AppError>;

    /// Create a new spreadsheet and return its identifier
    async fn create_spreadsheet(&self, name: &str) -> Result<String, AppError>;

    /// Grant write access on a spreadsheet to an email address
    async fn share_spreadsheet(&self, spreadsheet_id: &str, email: &str) -> Result<(), AppError>;

    /// Check whether a worksheet with the given title exists
    async fn worksheet_exists(&self, spreadsheet_id: &str, title: &str)
        -> Result<bool, AppError>;

    /// Add a worksheet with the given title
    async fn create_worksheet(&self, spreadsheet_id: &str, title: &str) -> Result<(), AppError>;

    /// Number of populated rows in the worksheet, header included
    async fn row_count(&self, handle: &TableHandle) -> Result<usize, AppError>;

    /// Append raw string rows (used for the header)
    async fn append_raw(&self, handle: &TableHandle, row: &[String]) -> Result<(), AppError>;

    /// Append data rows in one batched call
    async fn append_rows(&self, handle: &TableHandle, rows: &[FlatRow]) -> Result<(), AppError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_status_display() {
        assert_eq!(ExportStatus::RowsWritten(1).to_string(), "1 row written");
        assert_eq!(ExportStatus::RowsWritten(3).to_string(), "3 rows written");
        assert_eq!(
            ExportStatus::Failed("no token".into()).to_string(),
            "export failed: no token"
        );
        assert_eq!(
            ExportStatus::Skipped.to_string(),
            "skipped: nothing to export"
        );
    }
}
