// ABOUTME: Integration tests for the header-once export writer
// ABOUTME: Covers header idempotency, batched appends, skip, and failure degradation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Trainsheet

// Test modules don't need documentation
#![allow(missing_docs)]
// Allow unwrap in tests - tests should panic on failure
#![allow(clippy::unwrap_used)]

mod common;

use common::{FailureInjection, FakeBackend};
use serde_json::json;

use trainsheet::models::AnalysisResult;
use trainsheet::normalizer::normalize;
use trainsheet::schema::{FlatRow, Schema};
use trainsheet::sheets::writer::export;
use trainsheet::sheets::{ExportStatus, TableHandle};

fn sample_rows(schema: &Schema) -> Vec<FlatRow> {
    let result = AnalysisResult::from_value(json!({
        "workoutType": "Strength",
        "summary": { "date": "2026-07-14", "totalCalories": 412 },
        "details": {
            "exercises": [
                { "name": "Bench Press", "reps": 24 },
                { "name": "Deadlift", "reps": 15 }
            ]
        }
    }));
    normalize(&result, schema)
}

fn provisioned(backend: &FakeBackend) -> TableHandle {
    let id = backend.seed("Workout Log", "Workouts");
    TableHandle {
        spreadsheet_id: id,
        worksheet: "Workouts".into(),
    }
}

#[tokio::test]
async fn empty_worksheet_gets_header_then_data() {
    let schema = Schema::workout_columns();
    let backend = FakeBackend::new();
    let handle = provisioned(&backend);
    let rows = sample_rows(&schema);

    let status = export(&backend, &handle, &rows, &schema).await;
    assert_eq!(status, ExportStatus::RowsWritten(2));

    let stored = backend.rows(&handle);
    assert_eq!(stored.len(), 3);
    assert_eq!(stored[0], schema.header_row());
    assert_eq!(stored[1][7], "Bench Press");
    assert_eq!(stored[2][7], "Deadlift");
}

#[tokio::test]
async fn header_is_written_only_once() {
    let schema = Schema::workout_columns();
    let backend = FakeBackend::new();
    let handle = provisioned(&backend);
    let rows = sample_rows(&schema);

    export(&backend, &handle, &rows, &schema).await;
    export(&backend, &handle, &rows, &schema).await;

    let stored = backend.rows(&handle);
    let header_count = stored
        .iter()
        .filter(|row| **row == schema.header_row())
        .count();
    assert_eq!(header_count, 1);
    assert_eq!(stored.len(), 5);
}

#[tokio::test]
async fn one_export_is_one_batched_append() {
    let schema = Schema::workout_columns();
    let backend = FakeBackend::new();
    let handle = provisioned(&backend);
    let rows = sample_rows(&schema);

    export(&backend, &handle, &rows, &schema).await;
    // One append for the header, one for both data rows
    assert_eq!(backend.append_calls(), 2);

    export(&backend, &handle, &rows, &schema).await;
    assert_eq!(backend.append_calls(), 3);
}

#[tokio::test]
async fn empty_rows_skip_without_backend_calls() {
    let schema = Schema::workout_columns();
    let backend = FakeBackend::new();
    let handle = provisioned(&backend);

    let status = export(&backend, &handle, &[], &schema).await;
    assert_eq!(status, ExportStatus::Skipped);
    assert_eq!(backend.append_calls(), 0);
    assert!(backend.rows(&handle).is_empty());
}

#[tokio::test]
async fn append_failure_degrades_to_status() {
    let schema = Schema::workout_columns();
    let backend = FakeBackend::with_failures(FailureInjection {
        fail_append: true,
        ..FailureInjection::default()
    });
    let handle = provisioned(&backend);
    let rows = sample_rows(&schema);

    let status = export(&backend, &handle, &rows, &schema).await;
    match status {
        ExportStatus::Failed(reason) => assert!(reason.contains("append failed")),
        other => panic!("expected Failed, got {other:?}"),
    }
}

#[tokio::test]
async fn empty_cells_keep_column_alignment() {
    let schema = Schema::workout_columns();
    let backend = FakeBackend::new();
    let handle = provisioned(&backend);

    let result = AnalysisResult::from_value(json!({
        "workoutType": "Swim",
        "details": { "activity": "Freestyle" }
    }));
    let rows = normalize(&result, &schema);
    export(&backend, &handle, &rows, &schema).await;

    let stored = backend.rows(&handle);
    // All rows, data included, span the full schema width
    for row in &stored {
        assert_eq!(row.len(), schema.width());
    }
    assert_eq!(stored[1][21], "Freestyle");
    assert_eq!(stored[1][0], "");
}
