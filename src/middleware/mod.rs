// ABOUTME: HTTP middleware for the trainsheet server
// ABOUTME: Provides CORS configuration for browser clients
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Trainsheet

//! HTTP middleware configuration

pub mod cors;

pub use cors::setup_cors;
