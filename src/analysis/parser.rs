// ABOUTME: Lenient parser for the vision model's raw text response
// ABOUTME: Strips markdown fences, extracts the JSON object, and degrades to Unknown
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Trainsheet

//! # Analysis Response Parser
//!
//! Models wrap their JSON in markdown fences, prepend prose, or trail
//! commentary. This parser tolerates all of that: it strips fences, cuts
//! out the outermost JSON object, and hands the rest to the lenient
//! [`AnalysisResult`] decoder. Nothing here returns an error; unusable
//! text degrades to [`AnalysisResult::unknown`].

use tracing::warn;

use crate::models::AnalysisResult;

/// Parse the model's raw reply into a structured result
#[must_use]
pub fn parse_analysis(raw: &str) -> AnalysisResult {
    let candidate = strip_fences(raw);
    let Some(object) = extract_object(candidate) else {
        warn!("Analysis reply contained no JSON object, degrading to Unknown");
        return AnalysisResult::unknown();
    };

    match serde_json::from_str::<serde_json::Value>(object) {
        Ok(value) => AnalysisResult::from_value(value),
        Err(e) => {
            warn!(error = %e, "Analysis reply was not valid JSON, degrading to Unknown");
            AnalysisResult::unknown()
        }
    }
}

/// Remove a surrounding ```json ... ``` (or plain ```) fence if present
fn strip_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    rest.trim()
}

/// Slice out the outermost `{ .. }` object, ignoring surrounding prose
fn extract_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}
