// ABOUTME: Integration tests for the idempotent table provisioner
// ABOUTME: Covers resolve-or-create, share-on-create, and validation failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Trainsheet

// Test modules don't need documentation
#![allow(missing_docs)]
// Allow unwrap in tests - tests should panic on failure
#![allow(clippy::unwrap_used)]

mod common;

use common::{FailureInjection, FakeBackend};
use trainsheet::config::SheetTargetConfig;
use trainsheet::errors::ErrorCode;
use trainsheet::sheets::provisioner::provision;

fn target(spreadsheet: &str, worksheet: &str) -> SheetTargetConfig {
    SheetTargetConfig {
        spreadsheet_name: spreadsheet.to_owned(),
        worksheet_name: worksheet.to_owned(),
        share_with: None,
    }
}

#[tokio::test]
async fn creates_spreadsheet_and_worksheet_when_absent() {
    let backend = FakeBackend::new();
    let handle = provision(&backend, &target("Workout Log", "Workouts"))
        .await
        .unwrap();

    assert_eq!(handle.worksheet, "Workouts");
    assert_eq!(backend.create_calls(), 1);
    assert!(backend.rows(&handle).is_empty());
}

#[tokio::test]
async fn repeated_provisioning_settles_on_the_same_handle() {
    let backend = FakeBackend::new();
    let config = target("Workout Log", "Workouts");

    let first = provision(&backend, &config).await.unwrap();
    let second = provision(&backend, &config).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(backend.create_calls(), 1);
}

#[tokio::test]
async fn resolves_existing_spreadsheet_without_creating() {
    let backend = FakeBackend::new();
    let id = backend.seed("Workout Log", "Workouts");

    let handle = provision(&backend, &target("Workout Log", "Workouts"))
        .await
        .unwrap();

    assert_eq!(handle.spreadsheet_id, id);
    assert_eq!(backend.create_calls(), 0);
}

#[tokio::test]
async fn adds_missing_worksheet_to_existing_spreadsheet() {
    let backend = FakeBackend::new();
    let id = backend.seed("Workout Log", "Old Tab");

    let handle = provision(&backend, &target("Workout Log", "Workouts"))
        .await
        .unwrap();

    assert_eq!(handle.spreadsheet_id, id);
    assert_eq!(handle.worksheet, "Workouts");
    assert_eq!(backend.create_calls(), 0);
}

#[tokio::test]
async fn shares_only_on_the_create_path() {
    let backend = FakeBackend::new();
    let mut config = target("Workout Log", "Workouts");
    config.share_with = Some("owner@example.com".into());

    let handle = provision(&backend, &config).await.unwrap();
    assert_eq!(
        backend.shared_with(&handle.spreadsheet_id),
        vec!["owner@example.com".to_owned()]
    );

    // Second run resolves the existing document and must not re-share
    provision(&backend, &config).await.unwrap();
    assert_eq!(backend.shared_with(&handle.spreadsheet_id).len(), 1);
}

#[tokio::test]
async fn share_failure_does_not_abort_provisioning() {
    let backend = FakeBackend::with_failures(FailureInjection {
        fail_share: true,
        ..FailureInjection::default()
    });
    let mut config = target("Workout Log", "Workouts");
    config.share_with = Some("owner@example.com".into());

    let handle = provision(&backend, &config).await.unwrap();
    assert!(backend.shared_with(&handle.spreadsheet_id).is_empty());
}

#[tokio::test]
async fn empty_names_are_rejected() {
    let backend = FakeBackend::new();

    let err = provision(&backend, &target("", "Workouts")).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ProvisioningFailed);

    let err = provision(&backend, &target("Workout Log", "   "))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ProvisioningFailed);
}

#[tokio::test]
async fn backend_failures_propagate() {
    let backend = FakeBackend::with_failures(FailureInjection {
        fail_create: true,
        ..FailureInjection::default()
    });

    let err = provision(&backend, &target("Workout Log", "Workouts"))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ExternalServiceError);
}
