// ABOUTME: System-wide constants and configuration values for the trainsheet service
// ABOUTME: Contains env var names, defaults, and service identity constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Trainsheet

//! # Constants Module
//!
//! Application constants and environment-based configuration values.

/// Service identity constants
pub mod service {
    /// Canonical service name used in logs and response payloads
    pub const SERVICE_NAME: &str = "trainsheet-server";

    /// Service version from Cargo.toml
    pub const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");
}

/// Environment variable names read at startup
pub mod env_vars {
    /// HTTP port for the server
    pub const HTTP_PORT: &str = "TRAINSHEET_HTTP_PORT";

    /// Deployment environment (development, production, testing)
    pub const ENVIRONMENT: &str = "ENVIRONMENT";

    /// Logical name of the backing spreadsheet
    pub const SPREADSHEET_NAME: &str = "TRAINSHEET_SPREADSHEET_NAME";

    /// Worksheet (tab) name inside the spreadsheet
    pub const WORKSHEET_NAME: &str = "TRAINSHEET_WORKSHEET_NAME";

    /// Email address granted write access when the spreadsheet is created
    pub const SHARE_WITH: &str = "TRAINSHEET_SHARE_WITH";

    /// Upper bound on an uploaded request body, in bytes
    pub const MAX_UPLOAD_BYTES: &str = "TRAINSHEET_MAX_UPLOAD_BYTES";

    /// Which vision analysis provider to use
    pub const ANALYSIS_PROVIDER: &str = "TRAINSHEET_ANALYSIS_PROVIDER";

    /// Gemini API key for the vision analysis provider
    pub const GEMINI_API_KEY: &str = "GEMINI_API_KEY";

    /// Gemini model override
    pub const GEMINI_MODEL: &str = "TRAINSHEET_GEMINI_MODEL";

    /// OAuth bearer token for the Google Sheets / Drive APIs
    pub const SHEETS_ACCESS_TOKEN: &str = "GOOGLE_SHEETS_ACCESS_TOKEN";
}

/// Default values applied when the environment leaves a knob unset
pub mod defaults {
    /// Default HTTP port
    pub const HTTP_PORT: u16 = 8081;

    /// Default spreadsheet name
    pub const SPREADSHEET_NAME: &str = "Workout Log";

    /// Default worksheet name
    pub const WORKSHEET_NAME: &str = "Workouts";

    /// Default request body limit: 15 MiB covers several phone photos
    pub const MAX_UPLOAD_BYTES: usize = 15 * 1024 * 1024;
}
