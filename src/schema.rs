// ABOUTME: Fixed export schema for the workout table
// ABOUTME: Defines column names, column order, cell values, and flat rows
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Trainsheet

//! # Export Schema Registry
//!
//! The single source of truth for the tabular export layout. Every variant
//! writes into the same wide header; columns a variant does not populate are
//! left empty. Column order is part of the committed contract with existing
//! sheets and must not change between releases.

use std::collections::HashMap;

use serde_json::Value;

/// Column name constants, in no particular order. The committed order lives
/// in [`Schema::workout_columns`].
pub mod col {
    /// Session date
    pub const DATE: &str = "Date";
    /// Workout discriminant
    pub const WORKOUT_TYPE: &str = "WorkoutType";
    /// Session duration in minutes
    pub const DURATION_MIN: &str = "Duration_min";
    /// Total session calories
    pub const TOTAL_CALORIES: &str = "TotalCalories";
    /// Session average heart rate
    pub const AVG_HEART_RATE: &str = "AvgHeartRate";
    /// Session maximum heart rate
    pub const MAX_HEART_RATE: &str = "MaxHeartRate";
    /// Recording device
    pub const DEVICE: &str = "Device";
    /// Exercise name (strength)
    pub const EXERCISE: &str = "Exercise";
    /// Exercise time in minutes (strength)
    pub const EXERCISE_TIME_MIN: &str = "ExerciseTime_min";
    /// Repetitions (strength)
    pub const REPS: &str = "Reps";
    /// Sets (strength)
    pub const SETS: &str = "Sets";
    /// Per-exercise calories (strength)
    pub const EXERCISE_CALORIES: &str = "ExerciseCalories";
    /// Per-exercise average heart rate (strength)
    pub const EXERCISE_AVG_HR: &str = "ExerciseAvgHr";
    /// Per-exercise maximum heart rate (strength)
    pub const EXERCISE_MAX_HR: &str = "ExerciseMaxHr";
    /// Total run distance in kilometers
    pub const TOTAL_DISTANCE_KM: &str = "TotalDistance_km";
    /// Estimated fluid loss in milliliters (run)
    pub const FLUID_LOSS_ML: &str = "FluidLoss_ml";
    /// Interval label (run)
    pub const INTERVAL: &str = "Interval";
    /// Interval type (run)
    pub const INTERVAL_TYPE: &str = "IntervalType";
    /// Interval duration in minutes (run)
    pub const INTERVAL_DURATION_MIN: &str = "IntervalDuration_min";
    /// Interval distance in kilometers (run)
    pub const INTERVAL_DISTANCE_KM: &str = "IntervalDistance_km";
    /// Interval average heart rate (run)
    pub const INTERVAL_AVG_HR: &str = "IntervalAvgHr";
    /// Stroke / activity name (swim)
    pub const ACTIVITY: &str = "Activity";
    /// Swim distance in meters
    pub const SWIM_DISTANCE_M: &str = "SwimDistance_m";
    /// Pace per 100m (swim)
    pub const PACE_PER_100M: &str = "Pace_per_100m";
    /// Total stroke count (swim)
    pub const STROKES: &str = "Strokes";
    /// SWOLF score (swim)
    pub const SWOLF: &str = "Swolf";
}

/// Committed column order for the workout export table
const WORKOUT_COLUMNS: &[&str] = &[
    col::DATE,
    col::WORKOUT_TYPE,
    col::DURATION_MIN,
    col::TOTAL_CALORIES,
    col::AVG_HEART_RATE,
    col::MAX_HEART_RATE,
    col::DEVICE,
    col::EXERCISE,
    col::EXERCISE_TIME_MIN,
    col::REPS,
    col::SETS,
    col::EXERCISE_CALORIES,
    col::EXERCISE_AVG_HR,
    col::EXERCISE_MAX_HR,
    col::TOTAL_DISTANCE_KM,
    col::FLUID_LOSS_ML,
    col::INTERVAL,
    col::INTERVAL_TYPE,
    col::INTERVAL_DURATION_MIN,
    col::INTERVAL_DISTANCE_KM,
    col::INTERVAL_AVG_HR,
    col::ACTIVITY,
    col::SWIM_DISTANCE_M,
    col::PACE_PER_100M,
    col::STROKES,
    col::SWOLF,
];

/// One cell of an export row
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Free-form text
    Text(String),
    /// Numeric value
    Number(f64),
    /// Absent value; rendered as an empty cell
    Empty,
}

impl CellValue {
    /// Wrap an optional string; `None` maps to [`CellValue::Empty`]
    #[must_use]
    pub fn text(value: Option<&str>) -> Self {
        value.map_or(Self::Empty, |s| Self::Text(s.to_owned()))
    }

    /// Wrap an optional number; `None` maps to [`CellValue::Empty`]
    #[must_use]
    pub fn number(value: Option<f64>) -> Self {
        value.map_or(Self::Empty, Self::Number)
    }

    /// JSON form used on the wire. Empty cells serialize as `""` so sheet
    /// appends keep their column alignment.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Text(s) => Value::String(s.clone()),
            Self::Number(n) => serde_json::Number::from_f64(*n)
                .map_or_else(|| Value::String(n.to_string()), Value::Number),
            Self::Empty => Value::String(String::new()),
        }
    }
}

/// One fully projected export row, cells aligned with the schema order
#[derive(Debug, Clone, PartialEq)]
pub struct FlatRow {
    cells: Vec<CellValue>,
}

impl FlatRow {
    /// The projected cells, in schema column order
    #[must_use]
    pub fn cells(&self) -> &[CellValue] {
        &self.cells
    }

    /// Render the row as a JSON array for a values append call
    #[must_use]
    pub fn to_json_row(&self) -> Vec<Value> {
        self.cells.iter().map(CellValue::to_json).collect()
    }
}

/// A fixed, ordered set of columns that rows are projected onto
#[derive(Debug, Clone)]
pub struct Schema {
    columns: &'static [&'static str],
}

impl Schema {
    /// The committed workout export schema
    #[must_use]
    pub const fn workout_columns() -> Self {
        Self {
            columns: WORKOUT_COLUMNS,
        }
    }

    /// Column names in committed order
    #[must_use]
    pub const fn columns(&self) -> &'static [&'static str] {
        self.columns
    }

    /// Number of columns
    #[must_use]
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// The header row written once into an empty worksheet
    #[must_use]
    pub fn header_row(&self) -> Vec<String> {
        self.columns.iter().map(|c| (*c).to_owned()).collect()
    }

    /// Project named cells onto the schema. Columns without an entry are
    /// filled with [`CellValue::Empty`]; entries for unknown columns are
    /// dropped.
    #[must_use]
    pub fn project(&self, mut cells: HashMap<&'static str, CellValue>) -> FlatRow {
        FlatRow {
            cells: self
                .columns
                .iter()
                .map(|name| cells.remove(name).unwrap_or(CellValue::Empty))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_width_is_stable() {
        let schema = Schema::workout_columns();
        assert_eq!(schema.width(), 26);
        assert_eq!(schema.header_row().len(), 26);
    }

    #[test]
    fn test_header_starts_with_shared_columns() {
        let schema = Schema::workout_columns();
        assert_eq!(schema.columns()[0], col::DATE);
        assert_eq!(schema.columns()[1], col::WORKOUT_TYPE);
        assert_eq!(schema.columns()[25], col::SWOLF);
    }

    #[test]
    fn test_project_fills_missing_columns() {
        let schema = Schema::workout_columns();
        let mut cells = HashMap::new();
        cells.insert(col::WORKOUT_TYPE, CellValue::Text("Run".into()));
        cells.insert(col::TOTAL_DISTANCE_KM, CellValue::Number(5.2));

        let row = schema.project(cells);
        assert_eq!(row.cells().len(), 26);
        assert_eq!(row.cells()[1], CellValue::Text("Run".into()));
        assert_eq!(row.cells()[14], CellValue::Number(5.2));
        assert_eq!(row.cells()[0], CellValue::Empty);
    }

    #[test]
    fn test_cell_json_rendering() {
        assert_eq!(CellValue::Text("abc".into()).to_json(), "abc");
        assert_eq!(CellValue::Number(12.0).to_json(), 12.0);
        assert_eq!(CellValue::Empty.to_json(), "");
    }
}
