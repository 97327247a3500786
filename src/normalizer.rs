// ABOUTME: Flattens analyzed workout sessions into export rows
// ABOUTME: Expands repeated groups (exercises, intervals) into one row each
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Trainsheet

//! # Record Normalizer
//!
//! Turns one [`AnalysisResult`] into one or more [`FlatRow`]s projected onto
//! the committed export schema. Session-level fields repeat on every row of
//! the same session; repeated groups (strength exercises, run intervals)
//! expand into one row each, in source order. A session with no repeated
//! group still produces exactly one row, so every upload leaves a trace in
//! the table.

use std::collections::HashMap;

use crate::models::{AnalysisResult, RunDetails, StrengthDetails, SwimDetails, WorkoutDetails};
use crate::schema::{col, CellValue, FlatRow, Schema};

type Cells = HashMap<&'static str, CellValue>;

/// Flatten an analysis result into export rows, in schema column order
#[must_use]
pub fn normalize(result: &AnalysisResult, schema: &Schema) -> Vec<FlatRow> {
    let base = base_cells(result);

    match &result.details {
        WorkoutDetails::Strength(details) => strength_rows(schema, &base, details),
        WorkoutDetails::Run(details) => run_rows(schema, &base, details),
        WorkoutDetails::Swim(details) => vec![swim_row(schema, &base, details)],
        WorkoutDetails::Unknown => vec![schema.project(base)],
    }
}

/// Session-level cells shared by every row of the same session
fn base_cells(result: &AnalysisResult) -> Cells {
    let summary = &result.summary;
    let mut cells = Cells::new();
    cells.insert(col::DATE, CellValue::text(summary.date.as_deref()));
    cells.insert(
        col::WORKOUT_TYPE,
        CellValue::Text(result.workout_type().as_str().to_owned()),
    );
    cells.insert(col::DURATION_MIN, CellValue::number(summary.duration_minutes));
    cells.insert(col::TOTAL_CALORIES, CellValue::number(summary.total_calories));
    cells.insert(col::AVG_HEART_RATE, CellValue::number(summary.avg_heart_rate));
    cells.insert(col::MAX_HEART_RATE, CellValue::number(summary.max_heart_rate));
    cells.insert(col::DEVICE, CellValue::text(summary.device.as_deref()));
    cells
}

fn strength_rows(schema: &Schema, base: &Cells, details: &StrengthDetails) -> Vec<FlatRow> {
    if details.exercises.is_empty() {
        return vec![schema.project(base.clone())];
    }

    details
        .exercises
        .iter()
        .map(|exercise| {
            let mut cells = base.clone();
            cells.insert(col::EXERCISE, CellValue::text(exercise.name.as_deref()));
            cells.insert(
                col::EXERCISE_TIME_MIN,
                CellValue::number(exercise.time_minutes),
            );
            cells.insert(col::REPS, CellValue::number(exercise.reps));
            cells.insert(col::SETS, CellValue::number(exercise.sets));
            cells.insert(col::EXERCISE_CALORIES, CellValue::number(exercise.calories));
            cells.insert(
                col::EXERCISE_AVG_HR,
                CellValue::number(exercise.avg_heart_rate),
            );
            cells.insert(
                col::EXERCISE_MAX_HR,
                CellValue::number(exercise.max_heart_rate),
            );
            schema.project(cells)
        })
        .collect()
}

fn run_rows(schema: &Schema, base: &Cells, details: &RunDetails) -> Vec<FlatRow> {
    let mut run_base = base.clone();
    run_base.insert(
        col::TOTAL_DISTANCE_KM,
        CellValue::number(details.total_distance),
    );
    run_base.insert(
        col::FLUID_LOSS_ML,
        CellValue::number(details.estimated_fluid_loss),
    );

    if details.intervals.is_empty() {
        return vec![schema.project(run_base)];
    }

    details
        .intervals
        .iter()
        .map(|interval| {
            let mut cells = run_base.clone();
            cells.insert(col::INTERVAL, CellValue::text(interval.label.as_deref()));
            cells.insert(
                col::INTERVAL_TYPE,
                CellValue::text(interval.interval_type.as_deref()),
            );
            cells.insert(
                col::INTERVAL_DURATION_MIN,
                CellValue::number(interval.duration_minutes),
            );
            cells.insert(
                col::INTERVAL_DISTANCE_KM,
                CellValue::number(interval.distance),
            );
            cells.insert(
                col::INTERVAL_AVG_HR,
                CellValue::number(interval.avg_heart_rate),
            );
            schema.project(cells)
        })
        .collect()
}

fn swim_row(schema: &Schema, base: &Cells, details: &SwimDetails) -> FlatRow {
    let mut cells = base.clone();
    cells.insert(col::ACTIVITY, CellValue::text(details.activity.as_deref()));
    cells.insert(
        col::SWIM_DISTANCE_M,
        CellValue::number(details.total_distance),
    );
    cells.insert(col::PACE_PER_100M, CellValue::text(details.pace.as_deref()));
    cells.insert(col::STROKES, CellValue::number(details.stroke_count));
    cells.insert(col::SWOLF, CellValue::number(details.swolf));
    schema.project(cells)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn analyze(value: serde_json::Value) -> AnalysisResult {
        AnalysisResult::from_value(value)
    }

    #[test]
    fn test_strength_expands_one_row_per_exercise() {
        let schema = Schema::workout_columns();
        let result = analyze(json!({
            "workoutType": "Strength",
            "summary": { "date": "2026-07-14", "totalCalories": 412 },
            "details": {
                "exercises": [
                    { "name": "Bench Press", "reps": 24, "sets": 3 },
                    { "name": "Deadlift", "reps": 15, "sets": 3 }
                ]
            }
        }));

        let rows = normalize(&result, &schema);
        assert_eq!(rows.len(), 2);
        for row in &rows {
            assert_eq!(row.cells()[0], CellValue::Text("2026-07-14".into()));
            assert_eq!(row.cells()[3], CellValue::Number(412.0));
        }
        assert_eq!(rows[0].cells()[7], CellValue::Text("Bench Press".into()));
        assert_eq!(rows[1].cells()[7], CellValue::Text("Deadlift".into()));
    }

    #[test]
    fn test_empty_repeated_group_still_yields_one_row() {
        let schema = Schema::workout_columns();
        let result = analyze(json!({
            "workoutType": "Strength",
            "summary": { "date": "2026-07-14" },
            "details": { "exercises": [] }
        }));

        let rows = normalize(&result, &schema);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].cells()[1], CellValue::Text("Strength".into()));
    }

    #[test]
    fn test_run_intervals_keep_session_columns() {
        let schema = Schema::workout_columns();
        let result = analyze(json!({
            "workoutType": "Run",
            "summary": { "durationMinutes": 42 },
            "details": {
                "totalDistance": 8.4,
                "estimatedFluidLoss": 600,
                "intervals": [
                    { "label": "1", "type": "work", "distance": 1.0 },
                    { "label": "2", "type": "recovery", "distance": 0.4 }
                ]
            }
        }));

        let rows = normalize(&result, &schema);
        assert_eq!(rows.len(), 2);
        for row in &rows {
            assert_eq!(row.cells()[14], CellValue::Number(8.4));
            assert_eq!(row.cells()[15], CellValue::Number(600.0));
        }
        assert_eq!(rows[0].cells()[16], CellValue::Text("1".into()));
        assert_eq!(rows[1].cells()[17], CellValue::Text("recovery".into()));
    }

    #[test]
    fn test_swim_is_always_a_single_row() {
        let schema = Schema::workout_columns();
        let result = analyze(json!({
            "workoutType": "Swim",
            "summary": { "totalCalories": 301 },
            "details": {
                "activity": "Breaststroke",
                "totalDistance": 800,
                "pace": "2:05",
                "swolf": 38
            }
        }));

        let rows = normalize(&result, &schema);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].cells()[21], CellValue::Text("Breaststroke".into()));
        assert_eq!(rows[0].cells()[22], CellValue::Number(800.0));
        assert_eq!(rows[0].cells()[23], CellValue::Text("2:05".into()));
    }

    #[test]
    fn test_unknown_result_yields_single_base_row() {
        let schema = Schema::workout_columns();
        let rows = normalize(&AnalysisResult::unknown(), &schema);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].cells().len(), schema.width());
        assert_eq!(rows[0].cells()[1], CellValue::Text("Unknown".into()));
    }
}
