// ABOUTME: Main library entry point for the trainsheet service
// ABOUTME: Analyzes workout screenshots and exports normalized rows to a spreadsheet
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Trainsheet

#![deny(unsafe_code)]

//! # Trainsheet
//!
//! A small web service that turns screenshots of one workout session into
//! rows of an append-only spreadsheet. Uploaded images go to a multimodal
//! vision model, the reply is parsed into a variant-tagged result
//! (strength, run, swim, or unknown), normalized onto a fixed wide schema,
//! and appended to a Google-hosted worksheet that is provisioned by name
//! on first use.
//!
//! ## Architecture
//!
//! - **Analysis**: vision provider abstraction with a Gemini implementation
//! - **Models**: the lenient `AnalysisResult` discriminated union
//! - **Normalizer**: expands repeated groups into one export row each
//! - **Schema**: the committed column order every row is projected onto
//! - **Sheets**: backend trait, idempotent provisioner, header-once writer
//! - **Routes**: `POST /upload` plus health probes
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use trainsheet::config::ServerConfig;
//! use trainsheet::errors::AppResult;
//!
//! fn main() -> AppResult<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("Trainsheet configured with port: HTTP={}", config.http_port);
//!     Ok(())
//! }
//! ```

/// Vision analysis providers and response parsing
pub mod analysis;

/// Environment-based configuration management
pub mod config;

/// Application constants and configuration values
pub mod constants;

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Logging configuration and initialization
pub mod logging;

/// HTTP middleware configuration
pub mod middleware;

/// Core data models for analyzed workout sessions
pub mod models;

/// Flattening of analysis results into export rows
pub mod normalizer;

/// HTTP route handlers
pub mod routes;

/// Fixed export schema and row projection
pub mod schema;

/// Tabular export backends, provisioning, and the append writer
pub mod sheets;
