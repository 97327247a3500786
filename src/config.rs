// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Handles environment variables, deployment modes, and runtime configuration parsing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Trainsheet

//! Environment-based configuration management for production deployment

use serde::{Deserialize, Serialize};
use std::env;

use crate::constants::{defaults, env_vars};
use crate::errors::{AppError, AppResult};

/// Strongly typed log level configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "error" => Self::Error,
            "warn" => Self::Warn,
            "debug" => Self::Debug,
            "trace" => Self::Trace,
            _ => Self::Info,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warn => write!(f, "warn"),
            Self::Info => write!(f, "info"),
            Self::Debug => write!(f, "debug"),
            Self::Trace => write!(f, "trace"),
        }
    }
}

/// Deployment environment type
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Names identifying the backing spreadsheet and its worksheet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetTargetConfig {
    /// Logical spreadsheet name, resolved or created by name
    pub spreadsheet_name: String,
    /// Worksheet (tab) name inside the spreadsheet
    pub worksheet_name: String,
    /// Email granted write access when the spreadsheet is first created
    pub share_with: Option<String>,
}

/// Server configuration loaded from environment variables
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP port to bind
    pub http_port: u16,
    /// Deployment environment
    pub environment: Environment,
    /// Application log level
    pub log_level: LogLevel,
    /// Backing table identity
    pub sheet_target: SheetTargetConfig,
    /// Upper bound on an uploaded request body, in bytes
    pub max_upload_bytes: usize,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns a configuration error when a set variable fails to parse
    /// (e.g. a non-numeric port).
    pub fn from_env() -> AppResult<Self> {
        let http_port = parse_env_or(env_vars::HTTP_PORT, defaults::HTTP_PORT)?;
        let max_upload_bytes = parse_env_or(env_vars::MAX_UPLOAD_BYTES, defaults::MAX_UPLOAD_BYTES)?;

        let environment = Environment::from_str_or_default(
            &env::var(env_vars::ENVIRONMENT).unwrap_or_default(),
        );
        let log_level =
            LogLevel::from_str_or_default(&env::var("RUST_LOG").unwrap_or_default());

        let sheet_target = SheetTargetConfig {
            spreadsheet_name: env::var(env_vars::SPREADSHEET_NAME)
                .unwrap_or_else(|_| defaults::SPREADSHEET_NAME.into()),
            worksheet_name: env::var(env_vars::WORKSHEET_NAME)
                .unwrap_or_else(|_| defaults::WORKSHEET_NAME.into()),
            share_with: env::var(env_vars::SHARE_WITH).ok().filter(|s| !s.is_empty()),
        };

        Ok(Self {
            http_port,
            environment,
            log_level,
            sheet_target,
            max_upload_bytes,
        })
    }

    /// One-line human-readable summary for startup logging
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "port={} environment={} spreadsheet={:?} worksheet={:?}",
            self.http_port,
            self.environment,
            self.sheet_target.spreadsheet_name,
            self.sheet_target.worksheet_name
        )
    }
}

fn parse_env_or<T: std::str::FromStr>(var: &str, default: T) -> AppResult<T> {
    match env::var(var) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| AppError::config(format!("{var} is not a valid value: {raw:?}"))),
        Err(_) => Ok(default),
    }
}
