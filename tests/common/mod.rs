// ABOUTME: Shared test fixtures for integration tests
// ABOUTME: Provides an in-memory TabularBackend fake with call recording
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Trainsheet

// Test modules don't need documentation
#![allow(missing_docs)]
// Allow unwrap in tests - tests should panic on failure
#![allow(clippy::unwrap_used)]
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use trainsheet::errors::AppError;
use trainsheet::schema::FlatRow;
use trainsheet::sheets::{TabularBackend, TableHandle};

/// One spreadsheet in the fake backend
#[derive(Debug, Default, Clone)]
pub struct FakeSpreadsheet {
    pub name: String,
    pub shared_with: Vec<String>,
    /// worksheet title -> appended rows (header rows included, as strings)
    pub worksheets: HashMap<String, Vec<Vec<String>>>,
}

/// Which backend operations should fail, for error-path tests
#[derive(Debug, Default, Clone, Copy)]
pub struct FailureInjection {
    pub fail_find: bool,
    pub fail_create: bool,
    pub fail_share: bool,
    pub fail_append: bool,
}

/// In-memory spreadsheet store standing in for the Google APIs
#[derive(Debug, Default)]
pub struct FakeBackend {
    state: Mutex<FakeState>,
    pub failures: FailureInjection,
}

#[derive(Debug, Default)]
struct FakeState {
    spreadsheets: HashMap<String, FakeSpreadsheet>,
    next_id: usize,
    create_calls: usize,
    append_calls: usize,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_failures(failures: FailureInjection) -> Self {
        Self {
            state: Mutex::default(),
            failures,
        }
    }

    /// Pre-populate a spreadsheet with a worksheet
    pub fn seed(&self, name: &str, worksheet: &str) -> String {
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let id = format!("sheet-{}", state.next_id);
        let mut sheet = FakeSpreadsheet {
            name: name.to_owned(),
            ..FakeSpreadsheet::default()
        };
        sheet.worksheets.insert(worksheet.to_owned(), Vec::new());
        state.spreadsheets.insert(id.clone(), sheet);
        id
    }

    pub fn rows(&self, handle: &TableHandle) -> Vec<Vec<String>> {
        let state = self.state.lock().unwrap();
        state.spreadsheets[&handle.spreadsheet_id].worksheets[&handle.worksheet].clone()
    }

    pub fn shared_with(&self, spreadsheet_id: &str) -> Vec<String> {
        let state = self.state.lock().unwrap();
        state.spreadsheets[spreadsheet_id].shared_with.clone()
    }

    pub fn create_calls(&self) -> usize {
        self.state.lock().unwrap().create_calls
    }

    pub fn append_calls(&self) -> usize {
        self.state.lock().unwrap().append_calls
    }
}

#[async_trait]
impl TabularBackend for FakeBackend {
    async fn find_spreadsheet(&self, name: &str) -> Result<Option<String>, AppError> {
        if self.failures.fail_find {
            return Err(AppError::external_service("fake", "find failed"));
        }
        let state = self.state.lock().unwrap();
        Ok(state
            .spreadsheets
            .iter()
            .find(|(_, sheet)| sheet.name == name)
            .map(|(id, _)| id.clone()))
    }

    async fn create_spreadsheet(&self, name: &str) -> Result<String, AppError> {
        if self.failures.fail_create {
            return Err(AppError::external_service("fake", "create failed"));
        }
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        state.create_calls += 1;
        let id = format!("sheet-{}", state.next_id);
        state.spreadsheets.insert(
            id.clone(),
            FakeSpreadsheet {
                name: name.to_owned(),
                ..FakeSpreadsheet::default()
            },
        );
        Ok(id)
    }

    async fn share_spreadsheet(&self, spreadsheet_id: &str, email: &str) -> Result<(), AppError> {
        if self.failures.fail_share {
            return Err(AppError::external_service("fake", "share failed"));
        }
        let mut state = self.state.lock().unwrap();
        state
            .spreadsheets
            .get_mut(spreadsheet_id)
            .ok_or_else(|| AppError::not_found("spreadsheet"))?
            .shared_with
            .push(email.to_owned());
        Ok(())
    }

    async fn worksheet_exists(
        &self,
        spreadsheet_id: &str,
        title: &str,
    ) -> Result<bool, AppError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .spreadsheets
            .get(spreadsheet_id)
            .is_some_and(|sheet| sheet.worksheets.contains_key(title)))
    }

    async fn create_worksheet(&self, spreadsheet_id: &str, title: &str) -> Result<(), AppError> {
        let mut state = self.state.lock().unwrap();
        state
            .spreadsheets
            .get_mut(spreadsheet_id)
            .ok_or_else(|| AppError::not_found("spreadsheet"))?
            .worksheets
            .insert(title.to_owned(), Vec::new());
        Ok(())
    }

    async fn row_count(&self, handle: &TableHandle) -> Result<usize, AppError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .spreadsheets
            .get(&handle.spreadsheet_id)
            .and_then(|sheet| sheet.worksheets.get(&handle.worksheet))
            .map_or(0, Vec::len))
    }

    async fn append_raw(&self, handle: &TableHandle, row: &[String]) -> Result<(), AppError> {
        if self.failures.fail_append {
            return Err(AppError::external_service("fake", "append failed"));
        }
        let mut state = self.state.lock().unwrap();
        state.append_calls += 1;
        state
            .spreadsheets
            .get_mut(&handle.spreadsheet_id)
            .and_then(|sheet| sheet.worksheets.get_mut(&handle.worksheet))
            .ok_or_else(|| AppError::not_found("worksheet"))?
            .push(row.to_vec());
        Ok(())
    }

    async fn append_rows(&self, handle: &TableHandle, rows: &[FlatRow]) -> Result<(), AppError> {
        if self.failures.fail_append {
            return Err(AppError::external_service("fake", "append failed"));
        }
        let mut state = self.state.lock().unwrap();
        state.append_calls += 1;
        let worksheet = state
            .spreadsheets
            .get_mut(&handle.spreadsheet_id)
            .and_then(|sheet| sheet.worksheets.get_mut(&handle.worksheet))
            .ok_or_else(|| AppError::not_found("worksheet"))?;
        for row in rows {
            worksheet.push(
                row.to_json_row()
                    .into_iter()
                    .map(|v| match v {
                        serde_json::Value::String(s) => s,
                        other => other.to_string(),
                    })
                    .collect(),
            );
        }
        Ok(())
    }
}
