// ABOUTME: Core data models for analyzed workout sessions
// ABOUTME: Defines the AnalysisResult discriminated union and its variant payloads
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Trainsheet

//! # Data Models
//!
//! Core data structures for the result of a workout-session analysis. The
//! vision model returns a variant-tagged object keyed by `workoutType`; this
//! module models it as a proper sum type with an explicit `Unknown` fallback.
//!
//! ## Design Principles
//!
//! - **Lenient**: every field the model may omit is optional; a missing or
//!   unrecognized discriminant degrades to `Unknown` instead of failing
//! - **Serializable**: the deserialized result is echoed back to the caller
//!   unchanged, so all models round-trip through JSON
//! - **Type Safe**: variant payloads are concrete structs, not dynamic maps

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

/// Discriminant of an analyzed workout session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkoutType {
    /// Strength / gym session with repeated exercises
    Strength,
    /// Run with optional intervals
    Run,
    /// Swim session
    Swim,
    /// Unrecognized or absent discriminant
    Unknown,
}

impl WorkoutType {
    /// Resolve a raw discriminant string; `None` or anything unrecognized
    /// maps to `Unknown`
    #[must_use]
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag {
            Some(t) if t.eq_ignore_ascii_case("strength") => Self::Strength,
            Some(t) if t.eq_ignore_ascii_case("run") => Self::Run,
            Some(t) if t.eq_ignore_ascii_case("swim") => Self::Swim,
            _ => Self::Unknown,
        }
    }

    /// String form used in the export rows
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Strength => "Strength",
            Self::Run => "Run",
            Self::Swim => "Swim",
            Self::Unknown => "Unknown",
        }
    }
}

impl Display for WorkoutType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

/// Session-level summary common to all workout variants
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkoutSummary {
    /// Session date as reported by the model (free-form, e.g. "2026-07-14")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Total session duration in minutes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<f64>,
    /// Total calories burned
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_calories: Option<f64>,
    /// Average heart rate in BPM
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_heart_rate: Option<f64>,
    /// Maximum heart rate in BPM
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_heart_rate: Option<f64>,
    /// Recording device, if visible in the images
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device: Option<String>,
}

/// One exercise entry in a strength session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Exercise {
    /// Exercise name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Time spent on this exercise in minutes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_minutes: Option<f64>,
    /// Total repetitions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reps: Option<f64>,
    /// Number of sets
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sets: Option<f64>,
    /// Calories attributed to this exercise
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calories: Option<f64>,
    /// Average heart rate during this exercise
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_heart_rate: Option<f64>,
    /// Maximum heart rate during this exercise
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_heart_rate: Option<f64>,
}

/// A rest period between exercises. Pauses are session metadata and are not
/// expanded into export rows.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PauseEntry {
    /// Exercise the pause followed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after_exercise: Option<String>,
    /// Pause duration in minutes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<f64>,
}

/// Variant payload for strength sessions
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StrengthDetails {
    /// Repeated exercise entries; each expands into its own export row
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub exercises: Vec<Exercise>,
    /// Rest periods between exercises
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub pauses: Vec<PauseEntry>,
}

/// One interval within a run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RunInterval {
    /// Interval label (e.g. "1", "warmup")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Interval type (e.g. "work", "recovery")
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub interval_type: Option<String>,
    /// Interval duration in minutes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<f64>,
    /// Interval distance in kilometers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    /// Average heart rate during the interval
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_heart_rate: Option<f64>,
}

/// Variant payload for runs
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RunDetails {
    /// Total distance in kilometers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_distance: Option<f64>,
    /// Estimated fluid loss in milliliters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_fluid_loss: Option<f64>,
    /// Repeated interval entries; each expands into its own export row
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub intervals: Vec<RunInterval>,
}

/// Variant payload for swims. Swims always export as a single row; lap
/// granularity is not part of the committed schema.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SwimDetails {
    /// Stroke / activity name (e.g. "Breaststroke")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity: Option<String>,
    /// Total distance in meters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_distance: Option<f64>,
    /// Pace per 100m as reported (free-form, e.g. "2:05")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pace: Option<String>,
    /// Total stroke count
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_count: Option<f64>,
    /// SWOLF score
    #[serde(skip_serializing_if = "Option::is_none")]
    pub swolf: Option<f64>,
}

/// Variant-specific portion of an analysis result
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "workoutType", content = "details")]
pub enum WorkoutDetails {
    /// Strength session payload
    Strength(StrengthDetails),
    /// Run payload
    Run(RunDetails),
    /// Swim payload
    Swim(SwimDetails),
    /// No recognizable variant payload
    Unknown,
}

impl WorkoutDetails {
    /// The discriminant this payload belongs to
    #[must_use]
    pub const fn workout_type(&self) -> WorkoutType {
        match self {
            Self::Strength(_) => WorkoutType::Strength,
            Self::Run(_) => WorkoutType::Run,
            Self::Swim(_) => WorkoutType::Swim,
            Self::Unknown => WorkoutType::Unknown,
        }
    }
}

/// The analyzed result of one workout session
///
/// Deserialization is deliberately lenient: a missing `workoutType`, an
/// unrecognized discriminant, or a malformed variant payload all degrade to
/// defaults rather than rejecting the whole result.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    /// Session-level summary shared by all variants
    pub summary: WorkoutSummary,
    /// Variant-specific details
    #[serde(flatten)]
    pub details: WorkoutDetails,
}

impl AnalysisResult {
    /// Result carrying no extracted data at all
    #[must_use]
    pub fn unknown() -> Self {
        Self {
            summary: WorkoutSummary::default(),
            details: WorkoutDetails::Unknown,
        }
    }

    /// The discriminant of this result
    #[must_use]
    pub const fn workout_type(&self) -> WorkoutType {
        self.details.workout_type()
    }

    /// Build a result from an untyped JSON value
    ///
    /// Unknown discriminants and malformed sub-objects degrade to defaults;
    /// this never fails on shape, only on non-object input (which also
    /// degrades, to [`AnalysisResult::unknown`]).
    #[must_use]
    pub fn from_value(value: serde_json::Value) -> Self {
        let serde_json::Value::Object(mut map) = value else {
            return Self::unknown();
        };

        let tag = map
            .get("workoutType")
            .and_then(serde_json::Value::as_str)
            .map(str::to_owned);
        let summary = map
            .remove("summary")
            .and_then(|v| serde_json::from_value(v).ok())
            .unwrap_or_default();
        let details_value = map
            .remove("details")
            .unwrap_or(serde_json::Value::Null);

        let details = match WorkoutType::from_tag(tag.as_deref()) {
            WorkoutType::Strength => WorkoutDetails::Strength(lenient(details_value)),
            WorkoutType::Run => WorkoutDetails::Run(lenient(details_value)),
            WorkoutType::Swim => WorkoutDetails::Swim(lenient(details_value)),
            WorkoutType::Unknown => WorkoutDetails::Unknown,
        };

        Self { summary, details }
    }
}

impl<'de> Deserialize<'de> for AnalysisResult {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(Self::from_value(value))
    }
}

/// Deserialize a variant payload, null-filling on any shape mismatch
fn lenient<T: Default + serde::de::DeserializeOwned>(value: serde_json::Value) -> T {
    serde_json::from_value(value).unwrap_or_default()
}
